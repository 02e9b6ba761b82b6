// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Value types exchanged with map and panel hosts.

use core::fmt;

/// Radius of a marker at rest.
pub const BASE_RADIUS: f64 = 7.0;

/// Radius of the selected marker.
pub const HIGHLIGHT_RADIUS: f64 = 10.0;

/// Marker handle: the ordinal index of the record the marker was built from.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MarkerId(pub usize);

/// Geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Paint applied to a circle marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerStyle {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Fill colour.
    pub fill_color: String,
    /// Stroke colour; `None` draws no stroke.
    pub stroke_color: Option<String>,
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
}

/// Named regions of the detail panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelRegion {
    /// Event id, date and location block.
    EventDetails,
    /// Summary text, source and the table container.
    EventSummary,
    /// Label/value rows for the selected record.
    SummaryTable,
    /// Photo gallery list.
    ImageGallery,
    /// Video gallery list.
    VideoGallery,
    /// External link list.
    Urls,
    /// "Edit this event" dropdown entry.
    EditLink,
}

impl PanelRegion {
    /// Every region, in panel order.
    pub const ALL: [Self; 7] = [
        Self::EventDetails,
        Self::EventSummary,
        Self::SummaryTable,
        Self::ImageGallery,
        Self::VideoGallery,
        Self::Urls,
        Self::EditLink,
    ];

    /// Element id the browser host anchors this region to.
    pub const fn anchor_id(self) -> &'static str {
        match self {
            Self::EventDetails => "dateTime",
            Self::EventSummary => "summary",
            Self::SummaryTable => "summaryTable",
            Self::ImageGallery => "image_gallery",
            Self::VideoGallery => "video_gallery",
            Self::Urls => "urls",
            Self::EditLink => "edit_dropdown",
        }
    }
}

impl fmt::Display for PanelRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor_id())
    }
}

/// Token identifying one pending link load.
///
/// Tickets are issued per selection; a completion carrying a ticket that is
/// no longer current is stale and must be dropped.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkTicket(pub u64);
