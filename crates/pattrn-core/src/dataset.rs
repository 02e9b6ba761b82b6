// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dataset loading for GeoJSON collections and flat JSON row exports.

use pattrn_map_port::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::record::{parse_event_date, text_field, MediaSource, Record};
use crate::settings::{DataShape, DatasetMetadata};

/// Field holding the dataset membership tag.
pub const DATA_SET_FIELD: &str = "pattrn_data_set";

/// Where a dataset came from; drives detail table assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    /// GeoJSON FeatureCollection; properties are shown verbatim.
    GeojsonFile,
    /// Array of flat rows (spreadsheet export).
    JsonFile,
}

/// Error type for dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Input was not JSON.
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON that is neither a FeatureCollection nor an array of rows.
    #[error("unsupported dataset layout: {0}")]
    Layout(String),
}

/// Records loaded from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Source layout.
    pub kind: DataSourceKind,
    /// Records in source order, indexed from zero.
    pub records: Vec<Record>,
    /// Entries dropped for lack of usable coordinates.
    pub skipped: usize,
}

impl Dataset {
    /// Parse a dataset from JSON text.
    pub fn from_json(text: &str, metadata: &DatasetMetadata) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value, metadata)
    }

    /// Build a dataset from an already-parsed JSON value.
    pub fn from_value(value: Value, metadata: &DatasetMetadata) -> Result<Self, DatasetError> {
        let shape = metadata.shape();
        let (kind, entries) = match value {
            Value::Object(mut obj)
                if obj.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
            {
                match obj.remove("features") {
                    Some(Value::Array(features)) => (DataSourceKind::GeojsonFile, features),
                    _ => {
                        return Err(DatasetError::Layout(
                            "FeatureCollection without a features array".into(),
                        ))
                    }
                }
            }
            Value::Array(rows) => (DataSourceKind::JsonFile, rows),
            other => {
                return Err(DatasetError::Layout(format!(
                    "expected FeatureCollection or array, found {}",
                    json_kind(&other)
                )))
            }
        };

        let total = entries.len();
        let mut records = Vec::with_capacity(total);
        for (position, entry) in entries.into_iter().enumerate() {
            let parsed = match kind {
                DataSourceKind::GeojsonFile => feature_record(entry, shape),
                DataSourceKind::JsonFile => row_record(entry, shape),
            };
            match parsed {
                Some(mut record) => {
                    record.index = records.len();
                    records.push(record);
                }
                None => warn!(position, "skipping entry without usable coordinates"),
            }
        }

        let skipped = total - records.len();
        info!(?kind, records = records.len(), skipped, "dataset loaded");
        Ok(Self {
            kind,
            records,
            skipped,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn feature_record(feature: Value, shape: DataShape) -> Option<Record> {
    let Value::Object(mut feature) = feature else {
        return None;
    };
    let position = feature
        .get("geometry")
        .filter(|g| g.get("type").and_then(Value::as_str) == Some("Point"))
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .and_then(|coords| match coords.as_slice() {
            [lon, lat, ..] => Some(LatLng {
                lat: lat.as_f64()?,
                lon: lon.as_f64()?,
            }),
            _ => None,
        })?;
    let properties = match feature.remove("properties") {
        Some(Value::Object(props)) => props,
        _ => Map::new(),
    };
    let mut record = record_from_fields(position, properties, shape);
    if record.event_id.is_none() {
        record.event_id = text_field(feature.get("id"));
    }
    Some(record)
}

fn row_record(row: Value, shape: DataShape) -> Option<Record> {
    let Value::Object(row) = row else {
        return None;
    };
    let position = LatLng {
        lat: coordinate(row.get("latitude"))?,
        lon: coordinate(row.get("longitude"))?,
    };
    Some(record_from_fields(position, row, shape))
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn record_from_fields(position: LatLng, fields: Map<String, Value>, shape: DataShape) -> Record {
    let date = ["dd", "date_time"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .and_then(parse_event_date);
    let mut record = Record::at(0, position);
    record.event_id = text_field(fields.get("event_ID"));
    record.date = date;
    record.location_name = text_field(fields.get("location_name"));
    record.event_summary = text_field(fields.get("event_summary"));
    record.source_name = text_field(fields.get("source_name"));
    record.data_set = text_field(fields.get(DATA_SET_FIELD));
    record.photos = MediaSource::resolve(shape, fields.get("photos"));
    record.videos = MediaSource::resolve(shape, fields.get("videos"));
    record.links = MediaSource::resolve(shape, fields.get("links"));
    record.source_variables = fields;
    record
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::DatasetSchema;
    use serde_json::json;

    fn legacy() -> DatasetMetadata {
        DatasetMetadata {
            dataset_schema: Some(DatasetSchema { version: Some(1) }),
        }
    }

    #[test]
    fn geojson_features_become_records() {
        let data = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "f-1",
                    "geometry": {"type": "Point", "coordinates": [35.2, 31.7]},
                    "properties": {
                        "location_name": "Site A",
                        "date_time": "2021-05-01",
                        "pattrn_data_set": "ngo",
                        "photos": [{"src": "a.jpg"}]
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Polygon", "coordinates": []},
                    "properties": {}
                }
            ]
        });
        let dataset = Dataset::from_value(data, &DatasetMetadata::default()).unwrap();
        assert_eq!(dataset.kind, DataSourceKind::GeojsonFile);
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.skipped, 1);

        let record = &dataset.records[0];
        assert_eq!(record.position, LatLng { lat: 31.7, lon: 35.2 });
        assert_eq!(record.event_id.as_deref(), Some("f-1"));
        assert_eq!(record.data_set.as_deref(), Some("ngo"));
        assert!(record.date.is_some());
        assert!(matches!(record.photos, Some(MediaSource::Structured(ref v)) if v.len() == 1));
        assert!(record.source_variables.contains_key("location_name"));
    }

    #[test]
    fn rows_accept_string_coordinates_and_keep_legacy_media() {
        let data = json!([
            {"event_ID": "7", "latitude": "31.5", "longitude": "34.4",
             "photos": "{\"src\":\"a.jpg\"}"},
            {"event_ID": "8", "latitude": "", "longitude": "34.4"},
        ]);
        let dataset = Dataset::from_value(data, &legacy()).unwrap();
        assert_eq!(dataset.kind, DataSourceKind::JsonFile);
        assert_eq!(dataset.records.len(), 1);
        assert!(matches!(dataset.records[0].photos, Some(MediaSource::Legacy(_))));
    }

    #[test]
    fn indexes_are_dense_after_skips() {
        let data = json!([
            {"latitude": 1.0},
            {"latitude": 1.0, "longitude": 2.0},
            {"latitude": 3.0, "longitude": 4.0},
        ]);
        let dataset = Dataset::from_value(data, &DatasetMetadata::default()).unwrap();
        let indexes: Vec<_> = dataset.records.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1]);
    }

    #[test]
    fn blank_event_id_is_absent() {
        let data = json!([{"event_ID": "", "latitude": 1.0, "longitude": 2.0}]);
        let dataset = Dataset::from_value(data, &DatasetMetadata::default()).unwrap();
        assert_eq!(dataset.records[0].event_id, None);
    }

    #[test]
    fn scalar_json_is_rejected() {
        let err = Dataset::from_json("42", &DatasetMetadata::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Layout(_)));
        let err = Dataset::from_json("{", &DatasetMetadata::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }
}
