// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Incident records and their media references.

use std::borrow::Cow;

use pattrn_map_port::{LatLng, LinkItem, MediaItem};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::settings::DataShape;

/// Failure to decode a legacy media or link field.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The JSON fragment did not parse as a list of items.
    #[error("malformed legacy media field: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Media or link references in one of the two dataset encodings.
///
/// The variant is fixed when the dataset is loaded; decoding the legacy
/// string happens when the record is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource<T = MediaItem> {
    /// Comma-separated JSON objects without the surrounding brackets.
    Legacy(String),
    /// Already-structured items.
    Structured(Vec<T>),
}

impl<T> MediaSource<T>
where
    T: DeserializeOwned + Clone,
{
    /// Pick the variant for a raw field value under the dataset's shape.
    ///
    /// Arrays are always structured; entries that do not decode are logged
    /// and dropped. Strings are only meaningful in the legacy shape; elsewhere
    /// (and for blank values) there is nothing to show.
    pub fn resolve(shape: DataShape, value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Array(items) => Some(Self::Structured(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| {
                        serde_json::from_value(item.clone())
                            .inspect_err(|err| {
                                warn!(position, error = %err, "dropping malformed structured media item");
                            })
                            .ok()
                    })
                    .collect(),
            )),
            Value::String(raw) if shape == DataShape::Legacy && !raw.trim().is_empty() => {
                Some(Self::Legacy(raw.clone()))
            }
            _ => None,
        }
    }

    /// Decoded items.
    pub fn items(&self) -> Result<Cow<'_, [T]>, MediaError> {
        match self {
            Self::Structured(items) => Ok(Cow::Borrowed(items)),
            Self::Legacy(raw) => {
                let items: Vec<T> = serde_json::from_str(&format!("[{raw}]"))?;
                Ok(Cow::Owned(items))
            }
        }
    }
}

/// One geolocated incident.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Ordinal position in the dataset; also the marker id.
    pub index: usize,
    /// Event identifier; `None` when absent or blank.
    pub event_id: Option<String>,
    /// Marker position.
    pub position: LatLng,
    /// Event date.
    pub date: Option<Date>,
    /// Place name.
    pub location_name: Option<String>,
    /// Free-text summary.
    pub event_summary: Option<String>,
    /// Name of the reporting source.
    pub source_name: Option<String>,
    /// Dataset membership tag.
    pub data_set: Option<String>,
    /// Raw fields as they appeared in the source.
    pub source_variables: Map<String, Value>,
    /// Photo references.
    pub photos: Option<MediaSource>,
    /// Video references.
    pub videos: Option<MediaSource>,
    /// External links.
    pub links: Option<MediaSource<LinkItem>>,
}

impl Record {
    /// A record with only a position; every other field empty.
    pub fn at(index: usize, position: LatLng) -> Self {
        Self {
            index,
            event_id: None,
            position,
            date: None,
            location_name: None,
            event_summary: None,
            source_name: None,
            data_set: None,
            source_variables: Map::new(),
            photos: None,
            videos: None,
            links: None,
        }
    }

    /// Raw value of a field.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.source_variables.get(field)
    }

    /// Whether a field holds something other than null or an empty string.
    pub fn has_value(&self, field: &str) -> bool {
        self.value(field).is_some_and(is_present)
    }
}

/// Non-null and not the empty string.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Non-blank text from a raw value; numbers are rendered as text.
pub(crate) fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse an event date from `YYYY-MM-DD`, RFC 3339, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_event_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.date());
    }
    if let Ok(ts) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(ts.date());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

/// Full weekday, day, month and year, e.g. `Saturday, 01 May 2021`.
pub fn format_event_date(date: Date) -> Option<String> {
    date.format(format_description!(
        "[weekday], [day] [month repr:long] [year]"
    ))
    .ok()
}
