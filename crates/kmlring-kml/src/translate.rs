//! KML document to geometry tree translation
//!
//! The document becomes one flat `FeatureCollection` holding a `Feature` per
//! placemark, in document order. Documents and folders are walked but not
//! represented in the tree. Geometry maps as follows:
//!
//! | KML | Geometry node |
//! |-----|---------------|
//! | `Polygon` | `Polygon` (outer boundary only) |
//! | `LinearRing` | `Polygon` |
//! | `LineString` | `LineString` |
//! | `MultiGeometry` | `GeometryCollection` of its members, nested members spliced in place |
//! | `Point`, other elements | `Unknown` |
//! | `Model`, `gx:Track`, `gx:MultiTrack` | `Unknown` named after the element |
//! | no geometry | `Unknown` named `null` |
//!
//! The `kml` parser keeps geometry it does not model as a plain child element
//! of the placemark, so those kinds are recovered by element name. Inside a
//! `MultiGeometry` they are discarded by the parser and never reach the tree.
//! Altitudes are dropped.

use crate::error::{KmlError, Result};
use kml::types::{Coord, Geometry, Placemark};
use kml::Kml;
use kmlring_core::{Coordinate, GeometryNode};

/// Type name used for placemarks without geometry
pub const EMPTY_GEOMETRY: &str = "null";

/// Geometry elements the `kml` parser leaves as untyped placemark children
/// (local names, so `gx:Track` is `Track`)
const UNMODELLED_GEOMETRY: [&str; 3] = ["Model", "Track", "MultiTrack"];

/// Parse KML text and translate it into a geometry tree
///
/// A leading byte-order mark and surrounding whitespace are ignored.
///
/// # Errors
///
/// Returns [`KmlError::Parse`] if the text is not valid KML.
#[must_use = "the parsed geometry tree should be extracted"]
pub fn parse_document(text: &str) -> Result<GeometryNode> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    let document = text
        .parse::<Kml>()
        .map_err(|e| KmlError::Parse(e.to_string()))?;
    Ok(translate(&document))
}

/// Translate a parsed KML document into a flat `FeatureCollection`
#[must_use]
pub fn translate(document: &Kml) -> GeometryNode {
    let mut features = Vec::new();
    collect_placemarks(document, &mut features);
    GeometryNode::FeatureCollection { features }
}

fn collect_placemarks(kml: &Kml, features: &mut Vec<GeometryNode>) {
    match kml {
        Kml::KmlDocument(doc) => {
            for element in &doc.elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Document { elements, .. } => {
            for element in elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Folder(folder) => {
            for element in &folder.elements {
                collect_placemarks(element, features);
            }
        }
        Kml::Placemark(placemark) => features.push(placemark_to_feature(placemark)),
        // Styles, schemas and bare elements carry no geometry
        _ => {}
    }
}

fn placemark_to_feature(placemark: &Placemark) -> GeometryNode {
    let geometry = match &placemark.geometry {
        Some(geometry) => geometry_to_node(geometry),
        None => placemark
            .children
            .iter()
            .find(|child| UNMODELLED_GEOMETRY.contains(&child.name.as_str()))
            .map_or_else(
                || GeometryNode::unknown(EMPTY_GEOMETRY),
                |child| GeometryNode::unknown(child.name.clone()),
            ),
    };
    GeometryNode::feature(geometry)
}

fn geometry_to_node(geometry: &Geometry) -> GeometryNode {
    match geometry {
        Geometry::Polygon(polygon) => GeometryNode::Polygon {
            exterior_ring: to_coordinates(&polygon.outer.coords),
        },
        Geometry::LinearRing(ring) => GeometryNode::Polygon {
            exterior_ring: to_coordinates(&ring.coords),
        },
        Geometry::LineString(line) => GeometryNode::LineString {
            points: to_coordinates(&line.coords),
        },
        Geometry::MultiGeometry(multi) => {
            let mut members = Vec::new();
            splice_members(&multi.geometries, &mut members);
            match members.len() {
                0 => GeometryNode::unknown(EMPTY_GEOMETRY),
                1 => members.remove(0),
                _ => GeometryNode::GeometryCollection {
                    geometries: members,
                },
            }
        }
        Geometry::Point(_) => GeometryNode::unknown("Point"),
        Geometry::Element(element) => GeometryNode::unknown(element.name.clone()),
        _ => GeometryNode::unknown("Geometry"),
    }
}

/// Nested `MultiGeometry` members are spliced into their parent's list
fn splice_members(geometries: &[Geometry], members: &mut Vec<GeometryNode>) {
    for geometry in geometries {
        if let Geometry::MultiGeometry(nested) = geometry {
            splice_members(&nested.geometries, members);
        } else {
            members.push(geometry_to_node(geometry));
        }
    }
}

#[inline]
fn to_coordinates(coords: &[Coord]) -> Vec<Coordinate> {
    coords.iter().map(|c| Coordinate::new(c.x, c.y)).collect()
}
