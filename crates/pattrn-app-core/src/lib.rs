// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Pattrn map tools.
//! Keeps settings loading independent of where the blobs are stored.

pub mod config;

pub use config::{ConfigError, ConfigStore, LayerGroupConfig, SettingsService};
