//! Short-range geodetic distance
//!
//! Points are placed on the WGS-84 ellipsoid (altitude zero), converted to
//! Earth-centred Earth-fixed coordinates and the offset between them is
//! rotated into the local East-North-Up frame of the reference point. The
//! horizontal (east, north) norm is the distance. For points a few meters
//! apart this is accurate well below a millimeter, which is all ring
//! closure needs.

use crate::model::Coordinate;

/// Points closer than this are treated as the same point (1 mm)
pub const POINT_SNAPPING_THRESHOLD_METERS: f64 = 0.001;

/// WGS-84 semi-major axis (meters)
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// First eccentricity squared
const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// An offset in a local tangent plane (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Enu {
    /// Offset towards local east
    pub east: f64,
    /// Offset towards local north
    pub north: f64,
    /// Offset along the ellipsoid normal
    pub up: f64,
}

fn geodetic_to_ecef(point: Coordinate, altitude: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = point.latitude.to_radians().sin_cos();
    let (sin_lon, cos_lon) = point.longitude.to_radians().sin_cos();
    // Prime vertical radius of curvature
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    [
        (n + altitude) * cos_lat * cos_lon,
        (n + altitude) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + altitude) * sin_lat,
    ]
}

/// Position of `point` in the East-North-Up frame centred at `origin`
///
/// Both points are taken at altitude zero.
#[must_use]
pub fn geodetic_to_enu(point: Coordinate, origin: Coordinate) -> Enu {
    let [x, y, z] = geodetic_to_ecef(point, 0.0);
    let [x0, y0, z0] = geodetic_to_ecef(origin, 0.0);
    let (dx, dy, dz) = (x - x0, y - y0, z - z0);

    let (sin_lat, cos_lat) = origin.latitude.to_radians().sin_cos();
    let (sin_lon, cos_lon) = origin.longitude.to_radians().sin_cos();

    Enu {
        east: -sin_lon * dx + cos_lon * dy,
        north: -sin_lat * cos_lon * dx - sin_lat * sin_lon * dy + cos_lat * dz,
        up: cos_lat * cos_lon * dx + cos_lat * sin_lon * dy + sin_lat * dz,
    }
}

/// Horizontal distance in meters between `a` and `b` in `b`'s tangent plane
///
/// Non-finite input produces a non-finite result.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let enu = geodetic_to_enu(a, b);
    enu.east.hypot(enu.north)
}

/// Whether `a` and `b` are within [`POINT_SNAPPING_THRESHOLD_METERS`]
#[inline]
#[must_use]
pub fn is_close_enough(a: Coordinate, b: Coordinate) -> bool {
    // NaN compares false, so malformed coordinates are never close
    distance_meters(a, b) < POINT_SNAPPING_THRESHOLD_METERS
}
