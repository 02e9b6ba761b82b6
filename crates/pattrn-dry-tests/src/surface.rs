// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map surface double.

use pattrn_map_port::{LatLng, MapSurface, MarkerId, MarkerStyle};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A marker as currently drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    /// Marker position.
    pub position: LatLng,
    /// Current style (last placement or restyle).
    pub style: MarkerStyle,
    /// CSS class given at placement.
    pub class_name: String,
}

/// Map surface that records placements, restyles and popups.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<Mutex<SurfaceInner>>,
}

#[derive(Default)]
struct SurfaceInner {
    markers: BTreeMap<MarkerId, PlacedMarker>,
    restyles: Vec<(MarkerId, MarkerStyle)>,
    popups: Vec<MarkerId>,
    clears: usize,
}

impl RecordingSurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// A placed marker.
    pub fn marker(&self, id: MarkerId) -> Option<PlacedMarker> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .markers
            .get(&id)
            .cloned()
    }

    /// Current style of a placed marker.
    pub fn style_of(&self, id: MarkerId) -> Option<MarkerStyle> {
        self.marker(id).map(|m| m.style)
    }

    /// Number of markers on the surface.
    pub fn marker_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .markers
            .len()
    }

    /// Every `set_marker_style` call in order.
    pub fn restyles(&self) -> Vec<(MarkerId, MarkerStyle)> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .restyles
            .clone()
    }

    /// Markers a popup was opened on, in order.
    pub fn popups(&self) -> Vec<MarkerId> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .popups
            .clone()
    }

    /// Number of `clear_markers` calls.
    pub fn clears(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clears
    }
}

impl MapSurface for RecordingSurface {
    fn place_marker(
        &mut self,
        marker: MarkerId,
        position: LatLng,
        style: &MarkerStyle,
        class_name: &str,
    ) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .markers
            .insert(
                marker,
                PlacedMarker {
                    position,
                    style: style.clone(),
                    class_name: class_name.to_owned(),
                },
            );
    }

    fn set_marker_style(&mut self, marker: MarkerId, style: &MarkerStyle) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(placed) = inner.markers.get_mut(&marker) {
            placed.style = style.clone();
        }
        inner.restyles.push((marker, style.clone()));
    }

    fn open_popup(&mut self, marker: MarkerId, _position: LatLng) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .popups
            .push(marker);
    }

    fn clear_markers(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.markers.clear();
        inner.clears += 1;
    }
}
