//! Geospatial primitives over latitude/longitude pairs.
//!
//! Distances use the haversine great-circle formula on a spherical Earth.
//! Route legs are great-circle arcs, so projection onto a leg uses the
//! along-track and cross-track distances on the same sphere.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 coordinate in decimal degrees.
///
/// Always finite, with latitude in `[-90, 90]` and longitude in
/// `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use ev_reach::domain::GeoPoint;
///
/// let berlin = GeoPoint::new(52.52, 13.405).unwrap();
/// assert_eq!(berlin.latitude(), 52.52);
///
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, validating the coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a point from decimal-degree strings, as most web APIs send them.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, DomainError> {
        let lat = latitude
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::UnparsableCoordinate(latitude.to_string()))?;
        let lon = longitude
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::UnparsableCoordinate(longitude.to_string()))?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in kilometres.
///
/// Returns exactly 0 for identical points.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2))
    .min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Where a point falls relative to a route leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Distance from the leg start to the closest point on the leg,
    /// clamped to `[0, leg length]`.
    pub distance_along_segment_km: f64,

    /// Distance from the point to the closest point on the leg.
    pub lateral_offset_km: f64,
}

/// Initial great-circle bearing from `from` to `to`, in radians.
fn bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    y.atan2(x)
}

/// Project `point` onto the great-circle leg `segment_start → segment_end`.
///
/// The foot of the perpendicular is found with the spherical along-track
/// and cross-track distances. When it falls outside the leg, the nearer
/// endpoint is the closest point. A zero-length leg projects every point
/// onto its start.
pub fn project_onto_segment(
    point: &GeoPoint,
    segment_start: &GeoPoint,
    segment_end: &GeoPoint,
) -> SegmentProjection {
    let segment_km = distance_km(segment_start, segment_end);
    let to_point_km = distance_km(segment_start, point);
    if segment_km == 0.0 || to_point_km == 0.0 {
        return SegmentProjection {
            distance_along_segment_km: 0.0,
            lateral_offset_km: to_point_km,
        };
    }

    // Angular distances on the unit sphere.
    let d13 = to_point_km / EARTH_RADIUS_KM;
    let angle = bearing(segment_start, point) - bearing(segment_start, segment_end);

    let cross_track = (d13.sin() * angle.sin()).clamp(-1.0, 1.0).asin();
    // tan(along) = cos(angle) * tan(d13); signed, negative behind the start
    let along_track = (angle.cos() * d13.sin()).atan2(d13.cos());
    let along_km = along_track * EARTH_RADIUS_KM;

    if along_km <= 0.0 {
        SegmentProjection {
            distance_along_segment_km: 0.0,
            lateral_offset_km: to_point_km,
        }
    } else if along_km >= segment_km {
        SegmentProjection {
            distance_along_segment_km: segment_km,
            lateral_offset_km: distance_km(point, segment_end),
        }
    } else {
        SegmentProjection {
            distance_along_segment_km: along_km,
            lateral_offset_km: cross_track.abs() * EARTH_RADIUS_KM,
        }
    }
}
