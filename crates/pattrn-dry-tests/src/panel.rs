// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Detail panel double.

use pattrn_map_port::{DetailPanelView, PanelError, PanelRegion};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Detail panel that keeps region contents in memory.
///
/// Regions can be marked as missing to simulate a page without the anchor
/// element; writes to them fail with [`PanelError::MissingAnchor`].
#[derive(Clone, Default)]
pub struct RecordingPanel {
    inner: Arc<Mutex<PanelInner>>,
}

#[derive(Default)]
struct PanelInner {
    regions: BTreeMap<PanelRegion, String>,
    missing: BTreeSet<PanelRegion>,
    activations: usize,
    failed_writes: usize,
}

impl RecordingPanel {
    /// Panel with every region present and empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel lacking the anchor for `region`.
    #[must_use]
    pub fn without_anchor(self, region: PanelRegion) -> Self {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .missing
            .insert(region);
        self
    }

    /// Current markup of a region.
    pub fn content(&self, region: PanelRegion) -> String {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .regions
            .get(&region)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a region is empty.
    pub fn is_empty(&self, region: PanelRegion) -> bool {
        self.content(region).is_empty()
    }

    /// Number of `activate_details` calls.
    pub fn activations(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .activations
    }

    /// Writes rejected for a missing anchor.
    pub fn failed_writes(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failed_writes
    }

    fn write(&self, region: PanelRegion, html: &str, append: bool) -> Result<(), PanelError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.missing.contains(&region) {
            inner.failed_writes += 1;
            return Err(PanelError::MissingAnchor(region));
        }
        let slot = inner.regions.entry(region).or_default();
        if !append {
            slot.clear();
        }
        slot.push_str(html);
        Ok(())
    }
}

impl DetailPanelView for RecordingPanel {
    fn replace(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError> {
        self.write(region, html, false)
    }

    fn append(&mut self, region: PanelRegion, html: &str) -> Result<(), PanelError> {
        self.write(region, html, true)
    }

    fn activate_details(&mut self) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .activations += 1;
    }
}
