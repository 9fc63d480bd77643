//! # kmlring-core
//!
//! Closed polygon ring extraction from KML geometry trees.
//!
//! A KML document, once translated into a generic feature/geometry tree
//! ([`GeometryNode`]), is walked depth-first and every exterior ring that can
//! be made into a closed polygon is returned as a [`ClosedRing`]. Anything
//! that cannot is reported as an [`ExtractionError`] next to the rings that
//! could be built. Nothing in this crate fails hard on malformed geometry.
//!
//! ## Handled encodings
//!
//! | Encoding | Handling |
//! |----------|----------|
//! | Polygon exterior ring | validated directly |
//! | `LineString` | validated directly as a ring candidate |
//! | Collection of ≥ 3 two-point `LineString`s | stitched edge by edge, then validated |
//! | Closing coordinate within 1 mm of the opening one | snapped closed (last coordinate wins) |
//!
//! ## Quick Start
//!
//! ```
//! use kmlring_core::{extract, Coordinate, GeometryNode};
//!
//! // A square written as four disjoint edges
//! let tree = GeometryNode::feature(GeometryNode::GeometryCollection {
//!     geometries: vec![
//!         GeometryNode::line_string([(0.0, 0.0), (1.0, 0.0)]),
//!         GeometryNode::line_string([(1.0, 0.0), (1.0, 1.0)]),
//!         GeometryNode::line_string([(1.0, 1.0), (0.0, 1.0)]),
//!         GeometryNode::line_string([(0.0, 1.0), (0.0, 0.0)]),
//!     ],
//! });
//!
//! let result = extract(&tree);
//! assert!(result.is_clean());
//! assert_eq!(result.polygons[0].len(), 5);
//! assert_eq!(result.polygons[0].points()[2], Coordinate::new(1.0, 1.0));
//! ```
//!
//! Coordinates are `(longitude, latitude)` throughout. Use
//! [`ClosedRing::to_lat_lon`] when a consumer wants the opposite order.

pub mod error;
pub mod flatten;
pub mod geodesy;
pub mod model;
pub mod ring;
pub mod stitch;

pub use error::ExtractionError;
pub use flatten::{extract, flatten};
pub use geodesy::{distance_meters, is_close_enough, POINT_SNAPPING_THRESHOLD_METERS};
pub use model::{ClosedRing, Coordinate, Edge, ExtractionResult, GeometryNode};
pub use ring::validate;
pub use stitch::stitch;
