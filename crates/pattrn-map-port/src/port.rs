// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits implemented by map hosts.

use crate::{LatLng, LinkTicket, MarkerId, MarkerStyle, PanelError, PanelRegion};

/// Detail panel port.
///
/// The domain writes markup into named regions and toggles which side panel
/// is active. Implementations return [`PanelError::MissingAnchor`] when the
/// region has no element to write into; callers treat that as "skip this
/// region" and carry on with the rest.
///
/// Markup is built from dataset text without escaping. Hosts that render
/// datasets from untrusted sources must sanitise it before insertion.
pub trait DetailPanelView {
    /// Replace the content of a region.
    fn replace(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError>;

    /// Append markup to the end of a region.
    fn append(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError>;

    /// Empty a region.
    fn clear(&mut self, region: PanelRegion) -> Result<(), PanelError> {
        self.replace(region, "")
    }

    /// Show the detail panel and hide the layer list.
    fn activate_details(&mut self);
}

/// Map widget port: marker placement, restyling and popups.
pub trait MapSurface {
    /// Place a circle marker for a record.
    fn place_marker(
        &mut self,
        marker: MarkerId,
        position: LatLng,
        style: &MarkerStyle,
        class_name: &str,
    );

    /// Restyle an existing marker.
    fn set_marker_style(&mut self, marker: MarkerId, style: &MarkerStyle);

    /// Open the (empty) popup anchored on a marker.
    fn open_popup(&mut self, marker: MarkerId, position: LatLng);

    /// Drop every placed marker (layer reload).
    fn clear_markers(&mut self);
}

/// Chart collaborator that can filter the dataset down to one record.
pub trait ChartFilter {
    /// Record index the chart is currently filtered to, if any.
    fn filtered_index(&self) -> Option<usize>;

    /// Remove the current filter.
    fn clear_filter(&mut self);
}

/// Asynchronous link list loader.
///
/// The host starts whatever lookup it needs and later reports completion
/// through the map view with the same ticket.
pub trait LinkFetcher {
    /// Begin loading links for the record at `record_index`.
    fn request_links(&mut self, ticket: LinkTicket, record_index: usize);
}
