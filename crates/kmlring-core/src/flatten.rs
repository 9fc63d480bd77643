//! Geometry tree traversal

use crate::error::ExtractionError;
use crate::model::{ClosedRing, ExtractionResult, GeometryNode};
use crate::ring::validate;
use crate::stitch::{as_edge_list, stitch};
use log::debug;

/// Extract every closed ring from a geometry tree
///
/// Rings and errors are returned in the order they are encountered in a
/// depth-first walk of the tree.
///
/// # Examples
///
/// ```
/// use kmlring_core::{extract, GeometryNode};
///
/// let tree = GeometryNode::FeatureCollection {
///     features: vec![
///         GeometryNode::feature(GeometryNode::polygon([
///             (0.0, 0.0),
///             (1.0, 0.0),
///             (1.0, 1.0),
///             (0.0, 0.0),
///         ])),
///         GeometryNode::feature(GeometryNode::unknown("Point")),
///     ],
/// };
///
/// let result = extract(&tree);
/// assert_eq!(result.polygons.len(), 1);
/// assert_eq!(result.error_messages(), vec!["Unknown feature type: Point"]);
/// ```
#[must_use]
pub fn extract(node: &GeometryNode) -> ExtractionResult {
    let mut errors = Vec::new();
    let polygons = flatten(node, &mut errors);
    ExtractionResult { polygons, errors }
}

/// Walk `node`, returning its rings and appending rejections to `errors`
#[must_use = "rings are returned, only rejections go to `errors`"]
pub fn flatten(node: &GeometryNode, errors: &mut Vec<ExtractionError>) -> Vec<ClosedRing> {
    let mut rings = Vec::new();
    flatten_into(node, &mut rings, errors);
    rings
}

fn flatten_into(
    node: &GeometryNode,
    rings: &mut Vec<ClosedRing>,
    errors: &mut Vec<ExtractionError>,
) {
    match node {
        GeometryNode::FeatureCollection { features } => {
            for feature in features {
                flatten_into(feature, rings, errors);
            }
        }
        GeometryNode::GeometryCollection { geometries } => {
            if let Some(edges) = as_edge_list(geometries) {
                debug!("Reading {} two-point LineStrings as one polygon", edges.len());
                rings.extend(stitch(&edges, errors));
            } else {
                for geometry in geometries {
                    flatten_into(geometry, rings, errors);
                }
            }
        }
        GeometryNode::Feature { geometry } => flatten_into(geometry, rings, errors),
        GeometryNode::Polygon { exterior_ring } => {
            rings.extend(validate(exterior_ring.clone(), errors));
        }
        GeometryNode::LineString { points } => {
            rings.extend(validate(points.clone(), errors));
        }
        GeometryNode::Unknown { type_name } => {
            errors.push(ExtractionError::UnknownGeometryType {
                type_name: type_name.clone(),
            });
        }
    }
}
