// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port contracts between Pattrn map views and their host surfaces.
//!
//! This crate holds the traits a host implements (map widget, detail panel,
//! chart filter, link loader) and the small value types passed across them.
//! It contains NO selection or styling logic; that lives in pattrn-core.
//!
//! # Design Principles
//!
//! - **Hosts are dumb**: they place markers, swap styles and write markup.
//! - **No DOM lookups in the domain**: every panel region is addressed through
//!   [`DetailPanelView`], and a missing region is reported, not assumed.
//! - **No time ownership**: asynchronous link loads complete by calling back
//!   into the map view with the [`LinkTicket`] they were issued.

use thiserror::Error;

/// Error type for detail panel updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// The host has no anchor element for this region.
    #[error("panel region `{0}` has no anchor")]
    MissingAnchor(PanelRegion),
    /// A host-specific failure while writing markup.
    #[error("backend error: {0}")]
    Backend(String),
}

mod media;
mod port;
mod types;

pub use media::{LinkItem, MediaItem};
pub use port::{ChartFilter, DetailPanelView, LinkFetcher, MapSurface};
pub use types::{
    LatLng, LinkTicket, MarkerId, MarkerStyle, PanelRegion, BASE_RADIUS, HIGHLIGHT_RADIUS,
};
