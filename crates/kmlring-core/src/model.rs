//! Geometry tree and result types
//!
//! The tree mirrors the feature/geometry structure a KML document reduces
//! to. It is produced by a translator (see `kmlring-kml`) and only ever read
//! by the extractor.

use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// A geographic position (longitude, latitude) in degrees
///
/// No altitude is carried; it is treated as zero wherever geodetic
/// distance is computed. Serialized as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Longitude (degrees)
    pub longitude: f64,
    /// Latitude (degrees)
    pub latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude
    #[inline]
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Coordinate {
    #[inline]
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    #[inline]
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    #[inline]
    fn from(c: Coordinate) -> Self {
        [c.longitude, c.latitude]
    }
}

/// A two-point line segment, one edge of an edge-list polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First point of the segment
    pub start: Coordinate,
    /// Second point of the segment
    pub end: Coordinate,
}

/// A node of the generic feature/geometry tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryNode {
    /// Top-level list of features
    FeatureCollection { features: Vec<GeometryNode> },
    /// Several geometries belonging to one feature
    GeometryCollection { geometries: Vec<GeometryNode> },
    /// A feature wrapping a single geometry
    Feature { geometry: Box<GeometryNode> },
    /// A polygon; only its exterior ring is kept
    Polygon { exterior_ring: Vec<Coordinate> },
    /// An open or closed path
    LineString { points: Vec<Coordinate> },
    /// A node whose type the extractor does not handle
    Unknown { type_name: String },
}

impl GeometryNode {
    /// Wrap a geometry in a `Feature`
    #[must_use]
    pub fn feature(geometry: Self) -> Self {
        Self::Feature {
            geometry: Box::new(geometry),
        }
    }

    /// Build a `LineString` from anything convertible to coordinates
    #[must_use]
    pub fn line_string<I, C>(points: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        Self::LineString {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a `Polygon` from its exterior ring
    #[must_use]
    pub fn polygon<I, C>(exterior_ring: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        Self::Polygon {
            exterior_ring: exterior_ring.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an `Unknown` node
    #[must_use]
    pub fn unknown(type_name: impl Into<String>) -> Self {
        Self::Unknown {
            type_name: type_name.into(),
        }
    }

    /// Type tag of this node, as it appears in error messages
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::FeatureCollection { .. } => "FeatureCollection",
            Self::GeometryCollection { .. } => "GeometryCollection",
            Self::Feature { .. } => "Feature",
            Self::Polygon { .. } => "Polygon",
            Self::LineString { .. } => "LineString",
            Self::Unknown { type_name } => type_name,
        }
    }

    /// The node as an edge, if it is a `LineString` of exactly two points
    #[inline]
    #[must_use]
    pub fn as_edge(&self) -> Option<Edge> {
        match self {
            Self::LineString { points } => match points.as_slice() {
                [start, end] => Some(Edge {
                    start: *start,
                    end: *end,
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A polygon boundary that is guaranteed closed
///
/// Holds at least four coordinates and its first coordinate is exactly
/// equal to its last. Only [`crate::ring::validate`] creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedRing {
    points: Vec<Coordinate>,
}

impl ClosedRing {
    /// Callers must have checked length and closure.
    pub(crate) fn from_validated(points: Vec<Coordinate>) -> Self {
        debug_assert!(points.len() >= crate::ring::MIN_RING_LEN);
        debug_assert_eq!(points.first(), points.last());
        Self { points }
    }

    /// The ring's coordinates in (longitude, latitude) order
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Number of coordinates, including the repeated closing one
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a validated ring
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the ring, returning its coordinates
    #[must_use]
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Coordinates as `[latitude, longitude]` pairs, the order most map
    /// display libraries expect
    #[must_use]
    pub fn to_lat_lon(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|c| [c.latitude, c.longitude])
            .collect()
    }
}

/// Output of one extraction call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Closed rings, in the order they were encountered
    pub polygons: Vec<ClosedRing>,
    /// Reasons sub-geometries were rejected, in the order they were encountered
    pub errors: Vec<ExtractionError>,
}

impl ExtractionResult {
    /// A result carrying no polygons and a single input-level error
    #[must_use]
    pub fn from_input_error(error: impl std::fmt::Display) -> Self {
        Self {
            polygons: Vec::new(),
            errors: vec![ExtractionError::Input(error.to_string())],
        }
    }

    /// True when nothing was rejected
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error display strings, in order
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
