// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless port implementations.

use std::collections::BTreeMap;

use pattrn_map_port::{
    DetailPanelView, LatLng, MapSurface, MarkerId, MarkerStyle, PanelError, PanelRegion,
};
use tracing::trace;

/// Panel that keeps region markup in memory.
#[derive(Debug, Default)]
pub struct BufferedPanel {
    regions: BTreeMap<PanelRegion, String>,
}

impl BufferedPanel {
    /// Non-empty regions in panel order.
    pub fn filled(&self) -> impl Iterator<Item = (PanelRegion, &str)> {
        PanelRegion::ALL.into_iter().filter_map(|region| {
            self.regions
                .get(&region)
                .filter(|html| !html.is_empty())
                .map(|html| (region, html.as_str()))
        })
    }
}

impl DetailPanelView for BufferedPanel {
    fn replace(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError> {
        html.clone_into(self.regions.entry(region).or_default());
        Ok(())
    }

    fn append(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError> {
        self.regions.entry(region).or_default().push_str(html);
        Ok(())
    }

    fn activate_details(&mut self) {
        trace!("details panel activated");
    }
}

/// Surface with nothing to draw on; it only counts placements.
#[derive(Debug, Default)]
pub struct DetachedSurface {
    placed: usize,
}

impl DetachedSurface {
    /// Markers currently placed.
    pub fn placed(&self) -> usize {
        self.placed
    }
}

impl MapSurface for DetachedSurface {
    fn place_marker(
        &mut self,
        _marker: MarkerId,
        _position: LatLng,
        _style: &MarkerStyle,
        _class_name: &str,
    ) {
        self.placed += 1;
    }

    fn set_marker_style(&mut self, marker: MarkerId, style: &MarkerStyle) {
        trace!(marker = marker.0, radius = style.radius, "restyle");
    }

    fn open_popup(&mut self, marker: MarkerId, _position: LatLng) {
        trace!(marker = marker.0, "popup");
    }

    fn clear_markers(&mut self) {
        self.placed = 0;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn filled_skips_empty_regions_and_keeps_panel_order() {
        let mut panel = BufferedPanel::default();
        panel.append(PanelRegion::Urls, "<li>u</li>").unwrap();
        panel.replace(PanelRegion::EventDetails, "<div/>").unwrap();
        panel.clear(PanelRegion::ImageGallery).unwrap();

        let regions: Vec<PanelRegion> = panel.filled().map(|(r, _)| r).collect();
        assert_eq!(regions, vec![PanelRegion::EventDetails, PanelRegion::Urls]);
    }
}
