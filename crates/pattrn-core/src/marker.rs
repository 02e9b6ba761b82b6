// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker descriptors and the event content they carry.

use pattrn_map_port::{LatLng, MarkerId, MarkerStyle};
use serde::Serialize;

use crate::record::{format_event_date, Record};
use crate::settings::{DatasetPalette, InstanceSettings, LayerData, LayerGroup};
use crate::style::{resolve_style, StyleClass};

/// Label of a row in the event details block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetailLabel {
    /// Event identifier.
    EventId,
    /// Formatted event date.
    Date,
    /// Location name.
    Location,
}

impl DetailLabel {
    /// Caption text.
    pub const fn caption(self) -> &'static str {
        match self {
            Self::EventId => "EVENT ID:",
            Self::Date => "DATE:",
            Self::Location => "LOCATION: ",
        }
    }
}

/// One row of the event details block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Which row.
    pub label: DetailLabel,
    /// Rendered value.
    pub value: String,
}

/// Pre-assembled panel content for one record.
///
/// Built with the marker and written to the panel only on selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventContent {
    /// Event id, date and location rows; absent fields have no row.
    pub details: Vec<DetailRow>,
    /// Summary text.
    pub summary: Option<String>,
    /// Source name.
    pub source: Option<String>,
}

impl EventContent {
    /// Assemble content from a record.
    pub fn from_record(record: &Record) -> Self {
        let mut details = Vec::with_capacity(3);
        if let Some(id) = non_blank(record.event_id.as_deref()) {
            details.push(DetailRow {
                label: DetailLabel::EventId,
                value: id.to_owned(),
            });
        }
        if let Some(date) = record.date.and_then(format_event_date) {
            details.push(DetailRow {
                label: DetailLabel::Date,
                value: date,
            });
        }
        if let Some(location) = non_blank(record.location_name.as_deref()) {
            details.push(DetailRow {
                label: DetailLabel::Location,
                value: location.to_owned(),
            });
        }
        Self {
            details,
            summary: non_blank(record.event_summary.as_deref()).map(str::to_owned),
            source: non_blank(record.source_name.as_deref()).map(str::to_owned),
        }
    }

    /// Markup for the event details region.
    pub fn details_html(&self) -> String {
        let mut html =
            String::from("<div class='col-sm-12' style='padding-top:15px' id='background'>");
        for row in &self.details {
            html.push_str("<p class='caption-grey'>");
            html.push_str(row.label.caption());
            html.push_str("</p> <p class='noMargin'>");
            match row.label {
                DetailLabel::EventId => html.push_str(&row.value),
                DetailLabel::Date | DetailLabel::Location => {
                    html.push(' ');
                    html.push_str(&row.value);
                }
            }
            html.push_str("</p>");
            if row.label == DetailLabel::Location {
                html.push_str("<br/>");
            }
        }
        html.push_str("</div>");
        html
    }

    /// Markup for the event summary region, including the table container.
    pub fn summary_html(&self) -> String {
        let mut html =
            String::from("<div class='col-sm-12' style='padding-top:15px' id='infowindow'>");
        if let Some(summary) = &self.summary {
            html.push_str(&format!("<p class='summary'>{summary}</p>"));
        }
        if let Some(source) = &self.source {
            html.push_str(&format!(
                "<p class='caption-grey'>SOURCE:</p> <p class='summary'>{source}</p><br/>"
            ));
        }
        html.push_str("<div class='summaryTable'></div><br/></div>");
        html
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Everything the map surface needs to draw and route one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    /// Marker handle; equal to the record index. Clicks on the surface are
    /// routed back to the map view with this id.
    pub id: MarkerId,
    /// Position.
    pub position: LatLng,
    /// Resting style.
    pub style: MarkerStyle,
    /// CSS class key.
    pub class_name: StyleClass,
    /// Panel content shown on selection.
    pub content: EventContent,
}

/// Layer a marker belongs to.
#[derive(Debug, Clone, Copy)]
pub struct LayerContext<'a> {
    /// Owning group.
    pub group: &'a LayerGroup,
    /// Data layer.
    pub data: &'a LayerData,
}

/// Build the marker for one record.
///
/// Deterministic: the same inputs always give the same descriptor.
pub fn build_marker(
    record: &Record,
    palette: &DatasetPalette,
    layer: LayerContext<'_>,
    settings: &InstanceSettings,
) -> MarkerDescriptor {
    let resolved = resolve_style(record, palette, settings, layer.group, layer.data);
    MarkerDescriptor {
        id: MarkerId(record.index),
        position: record.position,
        style: resolved.marker_style(),
        class_name: resolved.class,
        content: EventContent::from_record(record),
    }
}
