//! Report rendering for the `extract` command

use clap::ValueEnum;
use kmlring_core::{ClosedRing, ExtractionResult};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Component order of every emitted coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum CoordinateOrder {
    /// `[longitude, latitude]`, as stored in KML (default)
    #[default]
    LonLat,
    /// `[latitude, longitude]`, as most map display libraries expect
    LatLon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonReport {
    pub points: Vec<[f64; 2]>,
}

/// Extraction outcome for one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub polygons: Vec<PolygonReport>,
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn new(file: impl Into<String>, result: &ExtractionResult, order: CoordinateOrder) -> Self {
        Self {
            file: file.into(),
            polygons: result
                .polygons
                .iter()
                .map(|ring| PolygonReport {
                    points: ordered_points(ring, order),
                })
                .collect(),
            errors: result.error_messages(),
        }
    }
}

fn ordered_points(ring: &ClosedRing, order: CoordinateOrder) -> Vec<[f64; 2]> {
    match order {
        CoordinateOrder::LonLat => ring.points().iter().map(|&c| c.into()).collect(),
        CoordinateOrder::LatLon => ring.to_lat_lon(),
    }
}

/// Render reports as JSON: one object for a single file, an array otherwise
pub fn render_json(reports: &[FileReport], compact: bool) -> serde_json::Result<String> {
    match (reports, compact) {
        ([single], true) => serde_json::to_string(single),
        ([single], false) => serde_json::to_string_pretty(single),
        (all, true) => serde_json::to_string(all),
        (all, false) => serde_json::to_string_pretty(all),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Render reports as indented text
pub fn render_text(reports: &[FileReport], order: CoordinateOrder) -> String {
    let header = match order {
        CoordinateOrder::LonLat => "lon, lat",
        CoordinateOrder::LatLon => "lat, lon",
    };

    let mut out = String::new();
    for report in reports {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{}: {}, {}",
            report.file,
            plural(report.polygons.len(), "polygon"),
            plural(report.errors.len(), "error")
        );
        for (i, polygon) in report.polygons.iter().enumerate() {
            let _ = writeln!(
                out,
                "  polygon {}: {} ({header})",
                i + 1,
                plural(polygon.points.len(), "point")
            );
            for [a, b] in &polygon.points {
                let _ = writeln!(out, "    {a}, {b}");
            }
        }
        for error in &report.errors {
            let _ = writeln!(out, "  error: {error}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmlring_core::{extract, GeometryNode};

    fn sample() -> ExtractionResult {
        extract(&GeometryNode::FeatureCollection {
            features: vec![
                GeometryNode::feature(GeometryNode::polygon([
                    (10.0, 50.0),
                    (11.0, 50.0),
                    (11.0, 51.0),
                    (10.0, 50.0),
                ])),
                GeometryNode::feature(GeometryNode::unknown("Point")),
            ],
        })
    }

    #[test]
    fn test_lat_lon_swaps_components() {
        let report = FileReport::new("a.kml", &sample(), CoordinateOrder::LatLon);
        assert_eq!(report.polygons[0].points[1], [50.0, 11.0]);

        let report = FileReport::new("a.kml", &sample(), CoordinateOrder::LonLat);
        assert_eq!(report.polygons[0].points[1], [11.0, 50.0]);
        assert_eq!(report.errors, vec!["Unknown feature type: Point"]);
    }

    #[test]
    fn test_json_single_vs_many() {
        let report = FileReport::new("a.kml", &sample(), CoordinateOrder::LonLat);

        let single: serde_json::Value =
            serde_json::from_str(&render_json(std::slice::from_ref(&report), true).unwrap())
                .unwrap();
        assert_eq!(single["file"], "a.kml");

        let many: serde_json::Value =
            serde_json::from_str(&render_json(&[report.clone(), report], false).unwrap()).unwrap();
        assert_eq!(many.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_text_summary() {
        let report = FileReport::new("a.kml", &sample(), CoordinateOrder::LonLat);
        let text = render_text(&[report], CoordinateOrder::LonLat);
        assert!(text.starts_with("a.kml: 1 polygon, 1 error\n"));
        assert!(text.contains("  polygon 1: 4 points (lon, lat)\n"));
        assert!(text.contains("    11, 50\n"));
        assert!(text.contains("  error: Unknown feature type: Point\n"));
    }
}
