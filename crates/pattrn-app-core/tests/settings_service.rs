// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings service behaviour against the in-memory store.
#![allow(clippy::unwrap_used)]

use pattrn_app_core::config::{LAYERS_KEY, METADATA_KEY, PALETTE_KEY, SETTINGS_KEY};
use pattrn_app_core::{ConfigError, LayerGroupConfig, SettingsService};
use pattrn_core::{
    DataShape, DatasetMetadata, DatasetPalette, DisplaySettings, Environment, InstanceSettings,
    LayerData, LayerStyle,
};
use pattrn_dry_tests::InMemoryConfigStore;

#[test]
fn missing_keys_give_defaults() {
    let service = SettingsService::new(InMemoryConfigStore::new());
    let display = service.display_settings().unwrap();
    assert_eq!(display, DisplaySettings::default());
    assert_eq!(service.metadata().unwrap(), DatasetMetadata::default());
    assert!(service.layer_groups().unwrap().is_empty());
}

#[test]
fn stored_settings_override_defaults() {
    let store = InMemoryConfigStore::new();
    store.insert_json(
        SETTINGS_KEY,
        r#"{"environment": "development", "script_url": "https://edit.example/"}"#,
    );
    let service = SettingsService::new(store.clone());

    let loaded = service.display_settings().unwrap();
    assert_eq!(loaded.instance.environment, Environment::Development);
    assert_eq!(
        loaded.instance.script_url.as_deref(),
        Some("https://edit.example/")
    );
    assert_eq!(loaded.instance.map, InstanceSettings::default().map);
    assert_eq!(store.load_count(), 2);
}

#[test]
fn palette_and_metadata_load_from_raw_json() {
    let store = InMemoryConfigStore::new();
    store.insert_json(PALETTE_KEY, r##"{"amnesty": "#00ff00"}"##);
    store.insert_json(METADATA_KEY, r#"{"document_schema": {"version": 1}}"#);
    let service = SettingsService::new(store);

    let palette: DatasetPalette = service.display_settings().unwrap().palette;
    assert_eq!(palette.color_for("amnesty"), Some("#00ff00"));
    assert_eq!(service.metadata().unwrap().shape(), DataShape::Legacy);
}

#[test]
fn layer_lookup_uses_group_style() {
    let store = InMemoryConfigStore::new();
    store.insert_json(
        LAYERS_KEY,
        r##"[{"id": "incidents", "style": {"stroke": "#222"}, "layers": [{"id": "2016"}]}]"##,
    );
    let service = SettingsService::new(store);
    assert_eq!(
        service.layer_groups().unwrap(),
        vec![LayerGroupConfig {
            id: "incidents".into(),
            style: LayerStyle {
                stroke: Some("#222".into()),
                ..LayerStyle::default()
            },
            layers: vec![LayerData { id: "2016".into() }],
        }]
    );

    let (group, data) = service.layer("incidents", "2016").unwrap();
    assert_eq!(group.style.stroke.as_deref(), Some("#222"));
    assert_eq!(data.id, "2016");

    let err = service.layer("other", "2016").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLayerGroup(_)));
}

#[test]
fn unconfigured_layers_resolve_bare() {
    let service = SettingsService::new(InMemoryConfigStore::new());
    let (group, data) = service.layer("g", "d").unwrap();
    assert_eq!(group.id, "g");
    assert_eq!(group.style, LayerStyle::default());
    assert_eq!(data.id, "d");
}

#[test]
fn store_failures_propagate() {
    let store = InMemoryConfigStore::new();
    store.set_fail_on_load(true);
    let service = SettingsService::new(store);
    assert!(matches!(
        service.display_settings(),
        Err(ConfigError::Other(_))
    ));
}

#[test]
fn malformed_blob_is_a_serde_error() {
    let store = InMemoryConfigStore::new();
    store.insert_json(SETTINGS_KEY, "{not json");
    let service = SettingsService::new(store);
    assert!(matches!(
        service.display_settings(),
        Err(ConfigError::Serde(_))
    ));
}
