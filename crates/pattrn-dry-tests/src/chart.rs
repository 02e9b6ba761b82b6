// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Chart filter fake.

use pattrn_map_port::ChartFilter;
use std::sync::{Arc, Mutex};

/// Chart that is either unfiltered or filtered to one record.
#[derive(Clone, Default)]
pub struct FakeChart {
    inner: Arc<Mutex<ChartInner>>,
}

#[derive(Default)]
struct ChartInner {
    filtered: Option<usize>,
    clears: usize,
}

impl FakeChart {
    /// Unfiltered chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the chart to one record.
    pub fn filter_to(&self, index: usize) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .filtered = Some(index);
    }

    /// Current filter.
    pub fn filtered(&self) -> Option<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .filtered
    }

    /// Number of `clear_filter` calls.
    pub fn clears(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clears
    }
}

impl ChartFilter for FakeChart {
    fn filtered_index(&self) -> Option<usize> {
        self.filtered()
    }

    fn clear_filter(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.filtered = None;
        inner.clears += 1;
    }
}
