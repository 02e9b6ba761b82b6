// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Instance, layer and dataset settings consumed by the map core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instance-wide display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSettings {
    /// Map marker defaults.
    #[serde(default)]
    pub map: MapSettings,
    /// Highlight colour for the selected marker.
    #[serde(default = "default_highlight_colour")]
    pub colour: String,
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// Base URL of the record editor; the event id is appended to it.
    #[serde(default)]
    pub script_url: Option<String>,
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            map: MapSettings::default(),
            colour: default_highlight_colour(),
            environment: Environment::default(),
            script_url: None,
        }
    }
}

fn default_highlight_colour() -> String {
    "#ff5722".into()
}

/// Map section of the instance settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Marker defaults.
    #[serde(default)]
    pub markers: MarkerSettings,
}

/// Marker defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {
    /// Fill colour used when no palette entry applies.
    #[serde(default = "default_marker_color")]
    pub color: String,
    /// Fill opacity of markers at rest.
    #[serde(default = "default_marker_opacity")]
    pub opacity: f64,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            color: default_marker_color(),
            opacity: default_marker_opacity(),
        }
    }
}

fn default_marker_color() -> String {
    "#daa520".into()
}

const fn default_marker_opacity() -> f64 {
    0.8
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development: the detail table carries layer ids.
    Development,
    /// Production: no diagnostic output. Unrecognised values land here.
    #[default]
    #[serde(other)]
    Production,
}

/// Dataset membership tag to marker fill colour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetPalette(pub BTreeMap<String, String>);

impl DatasetPalette {
    /// Colour configured for a membership tag.
    pub fn color_for(&self, data_set: &str) -> Option<&str> {
        self.0.get(data_set).map(String::as_str)
    }

    /// Set the colour of a membership tag.
    pub fn insert(&mut self, data_set: impl Into<String>, color: impl Into<String>) {
        self.0.insert(data_set.into(), color.into());
    }
}

impl<K, V> FromIterator<(K, V)> for DatasetPalette
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A group of map layers sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGroup {
    /// Group id; first half of the marker class key.
    pub id: String,
    /// Shared style.
    #[serde(default)]
    pub style: LayerStyle,
}

/// Style block of a layer group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stroke colour.
    #[serde(default)]
    pub stroke: Option<String>,
    /// Extra CSS class carrying an SVG pattern fill.
    #[serde(default)]
    pub patternfills_class: Option<String>,
}

/// One data layer inside a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {
    /// Layer id; second half of the marker class key.
    pub id: String,
}

/// Dataset-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Schema block; older exports call it `document_schema`.
    #[serde(default, alias = "document_schema")]
    pub dataset_schema: Option<DatasetSchema>,
}

/// Schema version block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Schema version; `1` marks spreadsheet-era exports.
    #[serde(default)]
    pub version: Option<u32>,
}

/// How media and link fields are encoded in a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataShape {
    /// Media and links are JSON fragments stored as strings.
    Legacy,
    /// Media and links are arrays under `source_variables`.
    #[default]
    Current,
}

impl DatasetMetadata {
    /// Data shape declared by `dataset_schema.version`; current when absent.
    pub fn shape(&self) -> DataShape {
        match self.dataset_schema.as_ref().and_then(|s| s.version) {
            Some(1) => DataShape::Legacy,
            _ => DataShape::Current,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn instance_settings_fill_defaults() {
        let settings: InstanceSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, InstanceSettings::default());
        assert_eq!(settings.environment, Environment::Production);
    }

    #[test]
    fn unknown_environment_is_production() {
        let settings: InstanceSettings =
            serde_json::from_str(r#"{"environment":"staging"}"#).unwrap();
        assert_eq!(settings.environment, Environment::Production);
        let settings: InstanceSettings =
            serde_json::from_str(r#"{"environment":"development"}"#).unwrap();
        assert_eq!(settings.environment, Environment::Development);
    }

    #[test]
    fn metadata_shape_follows_version() {
        let legacy: DatasetMetadata =
            serde_json::from_str(r#"{"document_schema":{"version":1}}"#).unwrap();
        assert_eq!(legacy.shape(), DataShape::Legacy);
        let current: DatasetMetadata =
            serde_json::from_str(r#"{"dataset_schema":{"version":2}}"#).unwrap();
        assert_eq!(current.shape(), DataShape::Current);
        assert_eq!(DatasetMetadata::default().shape(), DataShape::Current);
    }

    #[test]
    fn layer_style_accepts_and_drops_group_fill() {
        let group: LayerGroup = serde_json::from_str(
            r##"{"id":"incidents","style":{"fill":"#abcdef","stroke":"#000"}}"##,
        )
        .unwrap();
        assert_eq!(
            group.style,
            LayerStyle {
                stroke: Some("#000".into()),
                patternfills_class: None,
            }
        );
    }

    #[test]
    fn palette_is_a_plain_map() {
        let palette: DatasetPalette = serde_json::from_str(r##"{"ngo":"#00f"}"##).unwrap();
        assert_eq!(palette.color_for("ngo"), Some("#00f"));
        assert_eq!(palette.color_for("press"), None);
    }
}
