//! Integration tests for the kmlring CLI
//!
//! Every test runs in its own temporary directory with `HOME` pointed at
//! it, so user and project config discovery only sees files the test
//! writes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

const PARCELS_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Parcels</name>
    <Placemark>
      <name>Square</name>
      <Polygon><outerBoundaryIs><LinearRing><coordinates>
        10,50,0 11,50,0 11,51,0 10,51,0 10,50,0
      </coordinates></LinearRing></outerBoundaryIs></Polygon>
    </Placemark>
    <Placemark>
      <name>Edges</name>
      <MultiGeometry>
        <LineString><coordinates>0,0,0 1,0,0</coordinates></LineString>
        <LineString><coordinates>1,0,0 1,1,0</coordinates></LineString>
        <LineString><coordinates>1,1,0 0,0,0</coordinates></LineString>
      </MultiGeometry>
    </Placemark>
    <Placemark>
      <name>Well</name>
      <Point><coordinates>10.5,50.5,0</coordinates></Point>
    </Placemark>
  </Document>
</kml>"#;

const CLEAN_KML: &str = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Placemark><LineString><coordinates>0,0 1,0 1,1 0,0</coordinates></LineString></Placemark>
</Document></kml>"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn cli(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kmlring"));
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("RUST_LOG");
        cmd
    }
}

fn build_kmz(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<()> = FileOptions::default();
    for (name, contents) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn file_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============ EXTRACT COMMAND TESTS ============

#[test]
fn test_extract_help() {
    Sandbox::new()
        .cli()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract polygons from one or more"));
}

#[test]
fn test_extract_requires_input() {
    Sandbox::new().cli().arg("extract").assert().failure();
}

#[test]
fn test_extract_text() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());

    sandbox
        .cli()
        .args(["extract", "parcels.kml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parcels.kml: 2 polygons, 1 error"))
        .stdout(predicate::str::contains("polygon 1: 5 points (lon, lat)"))
        .stdout(predicate::str::contains("polygon 2: 4 points (lon, lat)"))
        .stdout(predicate::str::contains("error: Unknown feature type: Point"));
}

#[test]
fn test_extract_json() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());

    let value = json_output(sandbox.cli().args(["extract", "parcels.kml", "--format", "json"]));
    assert_eq!(value["file"], "parcels.kml");
    assert_eq!(value["polygons"].as_array().unwrap().len(), 2);
    assert_eq!(value["polygons"][0]["points"][1], serde_json::json!([11.0, 50.0]));
    assert_eq!(
        value["polygons"][1]["points"],
        serde_json::json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
    );
    assert_eq!(value["errors"], serde_json::json!(["Unknown feature type: Point"]));
}

#[test]
fn test_extract_json_lat_lon() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());

    let value = json_output(sandbox.cli().args([
        "extract",
        "parcels.kml",
        "-f",
        "json",
        "--order",
        "lat-lon",
        "--compact",
    ]));
    assert_eq!(value["polygons"][0]["points"][1], serde_json::json!([50.0, 11.0]));
}

#[test]
fn test_extract_kmz() {
    let sandbox = Sandbox::new();
    let kmz = build_kmz(&[("files/pin.png", b"\x89PNG"), ("doc.kml", PARCELS_KML.as_bytes())]);
    sandbox.write("parcels.KMZ", &kmz);

    let value = json_output(sandbox.cli().args(["extract", "parcels.KMZ", "--format", "json"]));
    assert_eq!(value["polygons"].as_array().unwrap().len(), 2);
}

#[test]
fn test_extract_kmz_without_kml() {
    let sandbox = Sandbox::new();
    sandbox.write("empty.kmz", &build_kmz(&[("readme.txt", b"nothing")]));

    let value = json_output(sandbox.cli().args(["extract", "empty.kmz", "--format", "json"]));
    assert_eq!(value["polygons"], serde_json::json!([]));
    assert_eq!(
        value["errors"],
        serde_json::json!(["Could not find KML file in given KMZ."])
    );
}

#[test]
fn test_extract_multiple_files_json_array() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());
    sandbox.write("clean.kml", CLEAN_KML.as_bytes());

    let value = json_output(sandbox.cli().args([
        "extract",
        "parcels.kml",
        "clean.kml",
        "--format",
        "json",
    ]));
    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["file"], "parcels.kml");
    assert_eq!(reports[1]["file"], "clean.kml");
    assert_eq!(reports[1]["errors"], serde_json::json!([]));
}

#[test]
fn test_extract_output_file() {
    let sandbox = Sandbox::new();
    sandbox.write("clean.kml", CLEAN_KML.as_bytes());
    let out = sandbox.path("out.json");

    sandbox
        .cli()
        .args(["extract", "clean.kml", "--format", "json", "-o", file_arg(&out)])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["polygons"].as_array().unwrap().len(), 1);
}

#[test]
fn test_extract_missing_file() {
    Sandbox::new()
        .cli()
        .args(["extract", "nope.kml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read nope.kml"));
}

#[test]
fn test_fail_on_error() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());
    sandbox.write("clean.kml", CLEAN_KML.as_bytes());

    sandbox
        .cli()
        .args(["extract", "parcels.kml", "--fail-on-error"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 polygon extraction error(s) reported"));

    sandbox
        .cli()
        .args(["extract", "clean.kml", "--fail-on-error"])
        .assert()
        .success();
}

// ============ CONFIG TESTS ============

#[test]
fn test_project_config_defaults() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());
    sandbox.write(
        ".kmlring.toml",
        b"[extract]\nformat = \"json\"\norder = \"lat-lon\"\n",
    );

    let value = json_output(sandbox.cli().args(["extract", "parcels.kml"]));
    assert_eq!(value["polygons"][0]["points"][1], serde_json::json!([50.0, 11.0]));
}

#[test]
fn test_cli_flags_override_config() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());
    sandbox.write(".kmlring.toml", b"[extract]\nformat = \"json\"\n");

    sandbox
        .cli()
        .args(["extract", "parcels.kml", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("parcels.kml: 2 polygons"));
}

#[test]
fn test_config_fail_on_error() {
    let sandbox = Sandbox::new();
    sandbox.write("parcels.kml", PARCELS_KML.as_bytes());
    let config = sandbox.write("strict.toml", b"[extract]\nfail_on_error = true\n");

    sandbox
        .cli()
        .args(["--config", file_arg(&config), "extract", "parcels.kml"])
        .assert()
        .failure();
}

#[test]
fn test_broken_project_config_is_ignored() {
    let sandbox = Sandbox::new();
    sandbox.write("clean.kml", CLEAN_KML.as_bytes());
    sandbox.write(".kmlring.toml", b"[extract\nformat =");

    sandbox
        .cli()
        .args(["extract", "clean.kml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clean.kml: 1 polygon, 0 errors"))
        .stderr(predicate::str::contains("Ignoring config"));
}

#[test]
fn test_broken_explicit_config_fails() {
    let sandbox = Sandbox::new();
    sandbox.write("clean.kml", CLEAN_KML.as_bytes());
    let config = sandbox.write("broken.toml", b"[extract\nformat =");

    sandbox
        .cli()
        .args(["--config", file_arg(&config), "extract", "clean.kml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_show_merges_tiers() {
    let sandbox = Sandbox::new();
    // HOME points at the sandbox, so both tiers resolve to files in it
    fs::create_dir(sandbox.path("project")).unwrap();
    sandbox.write(".kmlring.toml", b"[extract]\nformat = \"json\"\ncompact = true\n");
    sandbox.write("project/.kmlring.toml", b"[extract]\ncompact = false\n");

    sandbox
        .cli()
        .current_dir(sandbox.path("project"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("format = \"json\""))
        .stdout(predicate::str::contains("compact = false"));
}
