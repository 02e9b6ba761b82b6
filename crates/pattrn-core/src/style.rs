// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker style resolution.
//!
//! Fill, stroke and class key are resolved in a fixed order; the first rule
//! that applies wins. Resolution is pure so the resting style can be
//! recomputed at any time (the palette may have changed since the marker was
//! built).

use core::fmt;

use pattrn_map_port::{MarkerStyle, BASE_RADIUS, HIGHLIGHT_RADIUS};
use serde::{Serialize, Serializer};

use crate::record::Record;
use crate::settings::{DatasetPalette, InstanceSettings, LayerData, LayerGroup};

/// Stroke opacity of every marker.
pub const MARKER_OPACITY: f64 = 0.9;

/// Fill opacity of freshly built and highlighted markers.
pub const MARKER_FILL_OPACITY: f64 = 0.8;

/// CSS class key `{layer_group_id}__{layer_data_id}`, optionally followed by
/// a space and a pattern-fill class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleClass(String);

impl StyleClass {
    /// Compose a class key.
    pub fn new(group_id: &str, data_id: &str, pattern: Option<&str>) -> Self {
        let mut key = format!("{group_id}__{data_id}");
        if let Some(pattern) = pattern {
            key.push(' ');
            key.push_str(pattern);
        }
        Self(key)
    }

    /// The full class attribute.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `{group}__{data}` part without any pattern class.
    pub fn layer_key(&self) -> &str {
        self.0.split_once(' ').map_or(self.0.as_str(), |(key, _)| key)
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StyleClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Output of style resolution for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    /// Fill colour.
    pub fill: String,
    /// Stroke colour, carrying the leading space the browser host expects.
    pub stroke: Option<String>,
    /// Class key.
    pub class: StyleClass,
}

impl ResolvedStyle {
    /// Style of a freshly built marker.
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            radius: BASE_RADIUS,
            fill_color: self.fill.clone(),
            stroke_color: self.stroke.clone(),
            opacity: MARKER_OPACITY,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }

    /// Style of a marker returning to rest after deselection.
    pub fn restored_style(&self, settings: &InstanceSettings) -> MarkerStyle {
        MarkerStyle {
            fill_opacity: settings.map.markers.opacity,
            ..self.marker_style()
        }
    }

    /// Stroke without the leading-space quirk.
    pub fn normalized_stroke(&self) -> Option<&str> {
        self.stroke.as_deref().map(str::trim_start)
    }
}

/// Resolve fill, stroke and class key for a record.
///
/// 1. Fill: the palette colour for the record's dataset membership tag, else
///    the instance marker colour.
/// 2. Stroke: `" " + stroke` when the group sets one, else none.
/// 3. Class: `{group}__{data}`, plus `" " + patternfills_class` when set.
pub fn resolve_style(
    record: &Record,
    palette: &DatasetPalette,
    settings: &InstanceSettings,
    group: &LayerGroup,
    data: &LayerData,
) -> ResolvedStyle {
    let fill = record
        .data_set
        .as_deref()
        .and_then(|tag| palette.color_for(tag))
        .unwrap_or(&settings.map.markers.color)
        .to_owned();
    let stroke = group.style.stroke.as_ref().map(|s| format!(" {s}"));
    let class = StyleClass::new(&group.id, &data.id, group.style.patternfills_class.as_deref());
    ResolvedStyle {
        fill,
        stroke,
        class,
    }
}

/// Style applied to the selected marker.
pub fn highlight_style(settings: &InstanceSettings) -> MarkerStyle {
    MarkerStyle {
        radius: HIGHLIGHT_RADIUS,
        fill_color: settings.colour.clone(),
        stroke_color: Some(settings.colour.clone()),
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
    }
}
