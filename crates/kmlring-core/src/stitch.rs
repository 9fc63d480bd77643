//! Reconstruction of polygons encoded as lists of two-point edges
//!
//! Some exporters write a polygon boundary as a collection of disjoint
//! two-point `LineString`s instead of one ring. Array order alone is not
//! evidence that they form a loop, so every edge's start is checked against
//! the previous edge's end before the edges are joined.

use crate::error::ExtractionError;
use crate::geodesy::is_close_enough;
use crate::model::{ClosedRing, Edge, GeometryNode};
use crate::ring::validate;

/// A collection needs at least this many edges to be read as a polygon
pub const MIN_EDGE_COUNT: usize = 3;

/// Read a collection's children as an edge list
///
/// Returns `Some` only when there are at least [`MIN_EDGE_COUNT`] children
/// and every child is a `LineString` with exactly two points.
#[must_use]
pub fn as_edge_list(geometries: &[GeometryNode]) -> Option<Vec<Edge>> {
    if geometries.len() < MIN_EDGE_COUNT {
        return None;
    }
    geometries.iter().map(GeometryNode::as_edge).collect()
}

/// Join consecutive edges into one ring and validate it
///
/// The ring starts at the first edge's start point; each edge contributes
/// its end point once its start has been matched (within tolerance) to the
/// current end of the ring. A single break discards the whole ring.
#[must_use = "a rejected ring is only reported through `errors`"]
pub fn stitch(edges: &[Edge], errors: &mut Vec<ExtractionError>) -> Option<ClosedRing> {
    let Some(first) = edges.first() else {
        return validate(Vec::new(), errors);
    };

    let mut coords = Vec::with_capacity(edges.len() + 1);
    coords.push(first.start);
    let mut previous = first.start;

    for edge in edges {
        if !is_close_enough(edge.start, previous) {
            errors.push(ExtractionError::EdgeDiscontinuity);
            return None;
        }
        coords.push(edge.end);
        previous = edge.end;
    }

    validate(coords, errors)
}
