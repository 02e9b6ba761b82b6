// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pattrn map core.
//!
//! Turns a dataset of geolocated incidents into styled markers and drives
//! the detail panel when a marker is selected:
//!
//! - [`variables`]: schema fields grouped by display type, keeping only
//!   fields that carry data.
//! - [`style`] and [`marker`]: per-record fill/stroke/class resolution and
//!   pre-assembled event content.
//! - [`selection`]: the click / popup-close state machine.
//! - [`table`]: label/value rows for the selected record.
//!
//! Hosts plug in through the ports in `pattrn-map-port`.

pub mod dataset;
pub mod equality;
pub mod gallery;
pub mod marker;
pub mod record;
pub mod selection;
pub mod settings;
pub mod style;
pub mod table;
pub mod variables;

pub use dataset::{DataSourceKind, Dataset, DatasetError};
pub use marker::{build_marker, EventContent, LayerContext, MarkerDescriptor};
pub use record::{MediaError, MediaSource, Record};
pub use selection::{ClickOutcome, DisplaySettings, Layer, MapView, SelectionState};
pub use settings::{
    DataShape, DatasetMetadata, DatasetPalette, Environment, InstanceSettings, LayerData,
    LayerGroup, LayerStyle,
};
pub use style::{resolve_style, ResolvedStyle, StyleClass};
pub use table::{assemble_rows, TableRow};
pub use variables::{classify, Classification, ClassifiedVariableGroup, VariableDescriptor, VariableType};
