// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Link fetcher double.

use pattrn_map_port::{LinkFetcher, LinkTicket};
use std::sync::{Arc, Mutex};

/// Link fetcher that only records what was requested.
///
/// Tests complete a request by passing its ticket to
/// `MapView::complete_links`, in whatever order they like.
#[derive(Clone, Default)]
pub struct RecordingLinkFetcher {
    requests: Arc<Mutex<Vec<(LinkTicket, usize)>>>,
}

impl RecordingLinkFetcher {
    /// Fetcher with no requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(ticket, record index)` requested, in order.
    pub fn requests(&self) -> Vec<(LinkTicket, usize)> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Most recent ticket issued.
    pub fn last_ticket(&self) -> Option<LinkTicket> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|(ticket, _)| *ticket)
    }
}

impl LinkFetcher for RecordingLinkFetcher {
    fn request_links(&mut self, ticket: LinkTicket, record_index: usize) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((ticket, record_index));
    }
}
