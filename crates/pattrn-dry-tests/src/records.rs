// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record and layer fixtures.
//!
//! # Example
//!
//! ```
//! use pattrn_dry_tests::{fixture_layer, RecordBuilder};
//! use pattrn_core::{VariableDescriptor, VariableType};
//!
//! let records = vec![
//!     RecordBuilder::new()
//!         .event_id("42")
//!         .location("Site A")
//!         .var("fatalities", 3)
//!         .build(),
//! ];
//! let layer = fixture_layer(
//!     records,
//!     vec![VariableDescriptor::new("fatalities", VariableType::Integer)],
//! );
//! assert_eq!(layer.records.len(), 1);
//! ```

use pattrn_core::record::parse_event_date;
use pattrn_core::{
    DataSourceKind, Dataset, Layer, LayerData, LayerGroup, LayerStyle, MediaSource, Record,
    VariableDescriptor,
};
use pattrn_map_port::{LatLng, LinkItem, MediaItem};
use serde_json::Value;

/// Group id used by [`fixture_layer`].
pub const FIXTURE_GROUP: &str = "incidents";
/// Data layer id used by [`fixture_layer`].
pub const FIXTURE_DATA: &str = "2016";

/// Builder for [`Record`] values.
///
/// Indexes are left at zero; `MapView::load_layer` reindexes.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    /// Record at (0, 0) with every field empty.
    pub fn new() -> Self {
        Self {
            record: Record::at(0, LatLng { lat: 0.0, lon: 0.0 }),
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.record.position = LatLng { lat, lon };
        self
    }

    /// Set the event id.
    #[must_use]
    pub fn event_id(mut self, id: &str) -> Self {
        self.record.event_id = Some(id.to_owned());
        self
    }

    /// Set the date from a `YYYY-MM-DD` or RFC 3339 string; unparseable input leaves it unset.
    #[must_use]
    pub fn date(mut self, raw: &str) -> Self {
        self.record.date = parse_event_date(raw);
        self
    }

    /// Set the location name.
    #[must_use]
    pub fn location(mut self, name: &str) -> Self {
        self.record.location_name = Some(name.to_owned());
        self
    }

    /// Set the summary text.
    #[must_use]
    pub fn summary(mut self, text: &str) -> Self {
        self.record.event_summary = Some(text.to_owned());
        self
    }

    /// Set the source name.
    #[must_use]
    pub fn source(mut self, name: &str) -> Self {
        self.record.source_name = Some(name.to_owned());
        self
    }

    /// Set the dataset membership tag.
    #[must_use]
    pub fn data_set(mut self, tag: &str) -> Self {
        self.record.data_set = Some(tag.to_owned());
        self
    }

    /// Set a raw source field.
    #[must_use]
    pub fn var(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.record
            .source_variables
            .insert(field.to_owned(), value.into());
        self
    }

    /// Structured photos.
    #[must_use]
    pub fn photos(mut self, items: Vec<MediaItem>) -> Self {
        self.record.photos = Some(MediaSource::Structured(items));
        self
    }

    /// Photos in the legacy comma-joined encoding.
    #[must_use]
    pub fn legacy_photos(mut self, raw: &str) -> Self {
        self.record.photos = Some(MediaSource::Legacy(raw.to_owned()));
        self
    }

    /// Structured videos.
    #[must_use]
    pub fn videos(mut self, items: Vec<MediaItem>) -> Self {
        self.record.videos = Some(MediaSource::Structured(items));
        self
    }

    /// Structured links.
    #[must_use]
    pub fn links(mut self, items: Vec<LinkItem>) -> Self {
        self.record.links = Some(MediaSource::Structured(items));
        self
    }

    /// Finish.
    pub fn build(self) -> Record {
        self.record
    }
}

/// Builder for [`Layer`] values.
#[derive(Debug, Clone)]
pub struct LayerFixture {
    group: LayerGroup,
    data: LayerData,
    kind: DataSourceKind,
    records: Vec<Record>,
    variables: Vec<VariableDescriptor>,
    version: u64,
}

impl LayerFixture {
    /// Empty GeoJSON layer with the given ids and no group style.
    pub fn new(group_id: &str, data_id: &str) -> Self {
        Self {
            group: LayerGroup {
                id: group_id.to_owned(),
                style: LayerStyle::default(),
            },
            data: LayerData {
                id: data_id.to_owned(),
            },
            kind: DataSourceKind::GeojsonFile,
            records: Vec::new(),
            variables: Vec::new(),
            version: 0,
        }
    }

    /// Set the group style.
    #[must_use]
    pub fn style(mut self, style: LayerStyle) -> Self {
        self.group.style = style;
        self
    }

    /// Set the source layout.
    #[must_use]
    pub fn kind(mut self, kind: DataSourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the records.
    #[must_use]
    pub fn records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Set the schema.
    #[must_use]
    pub fn variables(mut self, variables: Vec<VariableDescriptor>) -> Self {
        self.variables = variables;
        self
    }

    /// Set the dataset version.
    #[must_use]
    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Finish.
    pub fn build(self) -> Layer {
        let dataset = Dataset {
            kind: self.kind,
            records: self.records,
            skipped: 0,
        };
        Layer::new(self.group, self.data, dataset, self.variables).with_version(self.version)
    }
}

/// GeoJSON layer `incidents` / `2016` over `records`.
pub fn fixture_layer(records: Vec<Record>, variables: Vec<VariableDescriptor>) -> Layer {
    LayerFixture::new(FIXTURE_GROUP, FIXTURE_DATA)
        .records(records)
        .variables(variables)
        .build()
}
