// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Pattrn map crates.
#![forbid(unsafe_code)]
//!
//! Every double is a cheap `Clone` over shared state, so a test can hand one
//! copy to a [`pattrn_core::MapView`] and keep another for assertions.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`panel`] - Detail panel that records region contents
//! - [`surface`] - Map surface that records marker styles and popups
//! - [`chart`] - Chart filter fake
//! - [`links`] - Link fetcher that records requests
//! - [`records`] - Record and layer fixtures

pub mod chart;
pub mod config;
pub mod links;
pub mod panel;
pub mod records;
pub mod surface;

// Re-export commonly used items at crate root for convenience
pub use chart::FakeChart;
pub use config::InMemoryConfigStore;
pub use links::RecordingLinkFetcher;
pub use panel::RecordingPanel;
pub use records::{fixture_layer, LayerFixture, RecordBuilder};
pub use surface::{PlacedMarker, RecordingSurface};
