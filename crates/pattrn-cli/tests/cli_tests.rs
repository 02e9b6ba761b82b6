// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end runs of the `pattrn` binary.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": {"type": "Point", "coordinates": [36.3, 33.5]},
      "properties": {
        "event_ID": "42",
        "pattrn_data_set": "ngo",
        "location_name": "Site A",
        "dd": "2021-05-01",
        "fatalities": 3,
        "weapon": "rifle,mortar",
        "age": ""
      }
    },
    {
      "type": "Feature",
      "geometry": {"type": "Point", "coordinates": [36.0, 34.0]},
      "properties": {"event_ID": "43", "fatalities": 0, "age": ""}
    }
  ]
}"#;

const SCHEMA: &str = r#"{
  "integer": [{"id": "fatalities", "name": "Fatalities"}, "age"],
  "tag": ["weapon"]
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.geojson"), DATASET).unwrap();
        fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config(&self, key: &str, json: &str) {
        fs::write(self.path("config").join(format!("{key}.json")), json).unwrap();
    }

    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("pattrn").unwrap();
        cmd.arg("--config-dir")
            .arg(self.path("config"))
            .args(args)
            .env_remove("RUST_LOG");
        cmd
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn classify_lists_only_fields_with_data() {
    let fx = Fixture::new();
    let data = fx.path("data.geojson");
    let schema = fx.path("schema.json");
    let output = fx
        .cmd(&[
            "classify",
            arg(&data),
            "--schema",
            arg(&schema),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let groups: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        groups,
        serde_json::json!([
            {"type": "integer", "names": ["fatalities"]},
            {"type": "tag", "names": ["weapon"]}
        ])
    );
}

#[test]
fn classify_table_shows_labels_and_counts() {
    let fx = Fixture::new();
    let data = fx.path("data.geojson");
    let schema = fx.path("schema.json");
    fx.cmd(&["classify", arg(&data), "--schema", arg(&schema)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fatalities"))
        .stdout(predicate::str::contains("weapon"))
        .stdout(predicate::str::contains("age").not());
}

#[test]
fn markers_take_palette_then_instance_colour() {
    let fx = Fixture::new();
    fx.config(
        "layers",
        r##"[{"id": "incidents", "style": {"fill": "#abcdef", "stroke": "#000"}, "layers": [{"id": "2016"}]}]"##,
    );
    fx.config("palette", r##"{"ngo": "#336699"}"##);
    fx.config("settings", r##"{"map": {"markers": {"color": "#daa520"}}}"##);
    let data = fx.path("data.geojson");
    let output = fx
        .cmd(&[
            "markers",
            arg(&data),
            "--group",
            "incidents",
            "--layer",
            "2016",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let markers: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let markers = markers.as_array().unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0]["class_name"], "incidents__2016");
    assert_eq!(markers[0]["style"]["fill_color"], "#336699");
    assert_eq!(markers[0]["style"]["stroke_color"], " #000");
    assert_eq!(markers[1]["id"], 1);
    assert_eq!(markers[1]["style"]["fill_color"], "#daa520");
}

#[test]
fn markers_rejects_unknown_group() {
    let fx = Fixture::new();
    fx.config("layers", r#"[{"id": "incidents"}]"#);
    let data = fx.path("data.geojson");
    fx.cmd(&["markers", arg(&data), "--group", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown layer group"));
}

#[test]
fn inspect_prints_rows_and_panel_regions() {
    let fx = Fixture::new();
    let data = fx.path("data.geojson");
    let schema = fx.path("schema.json");
    fx.cmd(&[
        "inspect",
        arg(&data),
        "--schema",
        arg(&schema),
        "--index",
        "0",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("rifle, mortar"))
    .stdout(predicate::str::contains("[dateTime]"))
    .stdout(predicate::str::contains("Saturday, 01 May 2021"))
    .stdout(predicate::str::contains("Site A"))
    .stdout(predicate::str::contains("layer_group").not());
}

#[test]
fn inspect_in_development_shows_layer_ids() {
    let fx = Fixture::new();
    fx.config("settings", r#"{"environment": "development"}"#);
    let data = fx.path("data.geojson");
    fx.cmd(&["inspect", arg(&data), "--index", "1", "--layer", "2016"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layer_group"))
        .stdout(predicate::str::contains("2016"));
}

#[test]
fn inspect_out_of_range_fails() {
    let fx = Fixture::new();
    let data = fx.path("data.geojson");
    fx.cmd(&["inspect", arg(&data), "--index", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record at index 9"));
}

#[test]
fn unreadable_dataset_reports_path() {
    let fx = Fixture::new();
    let missing = fx.path("missing.geojson");
    fx.cmd(&["markers", arg(&missing)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.geojson"));
}
