// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings service and storage port.

use pattrn_core::{
    DatasetMetadata, DatasetPalette, DisplaySettings, InstanceSettings, LayerData, LayerGroup,
    LayerStyle,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Key of the instance settings blob.
pub const SETTINGS_KEY: &str = "settings";
/// Key of the dataset membership palette blob.
pub const PALETTE_KEY: &str = "palette";
/// Key of the dataset metadata blob.
pub const METADATA_KEY: &str = "metadata";
/// Key of the layer configuration blob.
pub const LAYERS_KEY: &str = "layers";

/// Read-only storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Layer config names no such group.
    #[error("unknown layer group `{0}`")]
    UnknownLayerGroup(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// A layer group as configured: shared style plus its data layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGroupConfig {
    /// Group id.
    pub id: String,
    /// Shared style.
    #[serde(default)]
    pub style: LayerStyle,
    /// Data layers in the group.
    #[serde(default)]
    pub layers: Vec<LayerData>,
}

impl LayerGroupConfig {
    /// The group without its layer list.
    pub fn group(&self) -> LayerGroup {
        LayerGroup {
            id: self.id.clone(),
            style: self.style.clone(),
        }
    }
}

/// Deserializes settings blobs from a `ConfigStore`, falling back to
/// defaults for anything not stored.
pub struct SettingsService<S> {
    store: S,
}

impl<S> SettingsService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> SettingsService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => {
                debug!(key, "config key not stored; using defaults");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Instance settings and palette.
    pub fn display_settings(&self) -> Result<DisplaySettings, ConfigError> {
        Ok(DisplaySettings {
            instance: self
                .load::<InstanceSettings>(SETTINGS_KEY)?
                .unwrap_or_default(),
            palette: self.load::<DatasetPalette>(PALETTE_KEY)?.unwrap_or_default(),
        })
    }

    /// Dataset metadata.
    pub fn metadata(&self) -> Result<DatasetMetadata, ConfigError> {
        Ok(self.load(METADATA_KEY)?.unwrap_or_default())
    }

    /// Configured layer groups.
    pub fn layer_groups(&self) -> Result<Vec<LayerGroupConfig>, ConfigError> {
        Ok(self.load(LAYERS_KEY)?.unwrap_or_default())
    }

    /// Resolve a group and data layer by id.
    ///
    /// With no layer config stored, any ids resolve to an unstyled group.
    /// Once groups are configured, the group id must be one of them; a data
    /// id the group does not list is still accepted.
    pub fn layer(&self, group_id: &str, data_id: &str) -> Result<(LayerGroup, LayerData), ConfigError> {
        let groups = self.layer_groups()?;
        let data = LayerData {
            id: data_id.to_owned(),
        };
        if groups.is_empty() {
            return Ok((
                LayerGroup {
                    id: group_id.to_owned(),
                    style: LayerStyle::default(),
                },
                data,
            ));
        }
        let config = groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ConfigError::UnknownLayerGroup(group_id.to_owned()))?;
        if !config.layers.iter().any(|l| l.id == data_id) {
            debug!(group = group_id, layer = data_id, "data layer not listed in group config");
        }
        Ok((config.group(), data))
    }
}
