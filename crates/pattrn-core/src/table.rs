// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Detail table assembly for the selected record.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::dataset::{DataSourceKind, DATA_SET_FIELD};
use crate::record::Record;
use crate::variables::{Classification, VariableType};

static RESERVED_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^pattrn_[^_]{2,}").ok());

/// Whether a property key is internal bookkeeping hidden from the table.
///
/// `pattrn_data_set` is internal but always shown.
pub fn is_reserved_key(key: &str) -> bool {
    key != DATA_SET_FIELD
        && RESERVED_KEY
            .as_ref()
            .is_some_and(|re| re.is_match(key))
}

/// One label/value row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Field label.
    pub label: String,
    /// Rendered value.
    pub value: String,
}

impl TableRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Table row markup.
    pub fn to_html(&self) -> String {
        format!(
            "<tr class='col-sm-12'><th class='col-sm-6'><p>{}</p></th>\
             <th class='col-sm-6' ><p class='white'> {}</p> </th> </tr>",
            self.label, self.value
        )
    }
}

/// Layer ids appended to the table in development mode.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics<'a> {
    /// Layer group id.
    pub layer_group: &'a str,
    /// Layer data id.
    pub layer_data: &'a str,
}

/// Rows for the selected record.
///
/// Order is fixed: GeoJSON properties (in source order, GeoJSON datasets
/// only), then integer, tag and boolean fields, then diagnostics when given.
/// Fields without a value produce no row.
pub fn assemble_rows(
    record: &Record,
    classification: &Classification,
    source: DataSourceKind,
    diagnostics: Option<Diagnostics<'_>>,
) -> Vec<TableRow> {
    let mut rows = Vec::new();

    if source == DataSourceKind::GeojsonFile {
        rows.extend(
            record
                .source_variables
                .iter()
                .filter(|(key, value)| !value.is_null() && !is_reserved_key(key))
                .map(|(key, value)| TableRow::new(classification.label_for(key), scalar(value))),
        );
    }

    for (kind, render) in [
        (VariableType::Integer, scalar as fn(&Value) -> String),
        (VariableType::Tag, delimited),
        // Booleans are stored as delimited tag strings.
        (VariableType::Boolean, delimited),
    ] {
        let Some(names) = classification.group(kind) else {
            continue;
        };
        for name in names {
            if let Some(value) = record.value(name).filter(|v| !v.is_null()) {
                rows.push(TableRow::new(classification.label_for(name), render(value)));
            }
        }
    }

    if let Some(diag) = diagnostics {
        rows.push(TableRow::new("layer_group", diag.layer_group));
        rows.push(TableRow::new("layer_data", diag.layer_data));
    }

    rows
}

/// Verbatim rendering: strings as-is, everything else as compact JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `a,b,c` becomes `a, b, c`; arrays are joined the same way.
fn delimited(value: &Value) -> String {
    match value {
        Value::String(s) => s.split(',').collect::<Vec<_>>().join(", "),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        other => scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::VariableDescriptor;
    use pattrn_map_port::LatLng;
    use serde_json::json;

    fn record(fields: Value) -> Record {
        let mut r = Record::at(0, LatLng { lat: 0.0, lon: 0.0 });
        if let Value::Object(map) = fields {
            r.source_variables = map;
        }
        r
    }

    fn labels(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn reserved_prefix_filter() {
        assert!(is_reserved_key("pattrn_photos"));
        assert!(is_reserved_key("pattrn_id"));
        assert!(!is_reserved_key("pattrn_data_set"));
        assert!(!is_reserved_key("pattrn_x"));
        assert!(!is_reserved_key("pattrn__ab"));
        assert!(!is_reserved_key("killed"));
    }

    #[test]
    fn geojson_rows_come_first_then_types_in_fixed_order() {
        let data = vec![record(json!({
            "armed": "yes",
            "actors": "army,police",
            "killed": 3,
            "pattrn_data_set": "ngo",
            "pattrn_uuid": "x1",
        }))];
        let classification = Classification::new(
            vec![
                VariableDescriptor::new("armed", VariableType::Boolean),
                VariableDescriptor::new("actors", VariableType::Tag).named("Actors"),
                VariableDescriptor::new("killed", VariableType::Integer).named("Killed"),
            ],
            &data,
        );
        let rows = assemble_rows(&data[0], &classification, DataSourceKind::GeojsonFile, None);
        assert_eq!(
            labels(&rows),
            vec![
                "armed",
                "Actors",
                "Killed",
                "pattrn_data_set",
                "Killed",
                "Actors",
                "armed"
            ]
        );
        assert_eq!(rows[1].value, "army,police");
        assert_eq!(rows[4].value, "3");
        assert_eq!(rows[5].value, "army, police");
    }

    #[test]
    fn flat_rows_skip_property_dump() {
        let data = vec![record(json!({"killed": 1, "note": "x"}))];
        let classification = Classification::new(
            vec![VariableDescriptor::new("killed", VariableType::Integer)],
            &data,
        );
        let rows = assemble_rows(&data[0], &classification, DataSourceKind::JsonFile, None);
        assert_eq!(labels(&rows), vec!["killed"]);
    }

    #[test]
    fn missing_values_produce_no_row() {
        let data = vec![
            record(json!({"killed": 2})),
            record(json!({"injured": 5})),
        ];
        let classification = Classification::new(
            vec![
                VariableDescriptor::new("killed", VariableType::Integer),
                VariableDescriptor::new("injured", VariableType::Integer),
            ],
            &data,
        );
        let rows = assemble_rows(&data[0], &classification, DataSourceKind::JsonFile, None);
        assert_eq!(labels(&rows), vec!["killed"]);
    }

    #[test]
    fn booleans_render_like_tags() {
        let data = vec![record(json!({"flags": "true,verified"}))];
        let classification = Classification::new(
            vec![VariableDescriptor::new("flags", VariableType::Boolean)],
            &data,
        );
        let rows = assemble_rows(&data[0], &classification, DataSourceKind::JsonFile, None);
        assert_eq!(rows[0].value, "true, verified");
    }

    #[test]
    fn diagnostics_are_appended_last() {
        let data = vec![record(json!({"killed": 1}))];
        let classification = Classification::new(
            vec![VariableDescriptor::new("killed", VariableType::Integer)],
            &data,
        );
        let rows = assemble_rows(
            &data[0],
            &classification,
            DataSourceKind::JsonFile,
            Some(Diagnostics {
                layer_group: "g",
                layer_data: "d",
            }),
        );
        assert_eq!(labels(&rows), vec!["killed", "layer_group", "layer_data"]);
        assert_eq!(rows[2].value, "d");
    }

    #[test]
    fn row_markup() {
        let row = TableRow::new("Killed", "3");
        assert_eq!(
            row.to_html(),
            "<tr class='col-sm-12'><th class='col-sm-6'><p>Killed</p></th>\
             <th class='col-sm-6' ><p class='white'> 3</p> </th> </tr>"
        );
    }
}
