//! Cumulative-distance profile of a driving route.

use serde::Serialize;
use tracing::trace;

use super::error::DomainError;
use super::geo::{GeoPoint, distance_km};

/// A route vertex with the distance driven from the origin to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    pub position: GeoPoint,
    pub cumulative_distance_km: f64,
}

/// An ordered path from origin to destination.
///
/// Invariants (enforced by [`Route::build`]):
/// - at least two points;
/// - no two consecutive points coincide;
/// - `cumulative_distance_km` starts at 0 and strictly increases.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<RoutePoint>,
}

impl Route {
    /// Build the distance profile from raw route geometry.
    ///
    /// Consecutive duplicate points (zero-length legs) are dropped. Fails if
    /// fewer than two distinct points remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use ev_reach::domain::{GeoPoint, Route};
    ///
    /// let a = GeoPoint::new(0.0, 0.0).unwrap();
    /// let b = GeoPoint::new(0.0, 1.0).unwrap();
    ///
    /// let route = Route::build(&[a, a, b]).unwrap();
    /// assert_eq!(route.points().len(), 2);
    /// assert!(route.length_km() > 111.0);
    ///
    /// assert!(Route::build(&[a, a]).is_err());
    /// ```
    pub fn build(geometry: &[GeoPoint]) -> Result<Self, DomainError> {
        if geometry.len() < 2 {
            return Err(DomainError::InvalidRoute {
                reason: "at least 2 points required",
                points: geometry.len(),
            });
        }

        let mut points: Vec<RoutePoint> = Vec::with_capacity(geometry.len());
        let mut skipped = 0usize;

        for position in geometry {
            match points.last() {
                None => points.push(RoutePoint {
                    position: *position,
                    cumulative_distance_km: 0.0,
                }),
                Some(prev) => {
                    let leg = distance_km(&prev.position, position);
                    if leg == 0.0 {
                        skipped += 1;
                        continue;
                    }
                    points.push(RoutePoint {
                        position: *position,
                        cumulative_distance_km: prev.cumulative_distance_km + leg,
                    });
                }
            }
        }

        if points.len() < 2 {
            return Err(DomainError::InvalidRoute {
                reason: "at least 2 distinct points required",
                points: points.len(),
            });
        }

        trace!(
            points = points.len(),
            skipped,
            "built route distance profile"
        );

        Ok(Self { points })
    }

    /// The route vertices in driving order.
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Total driving distance in kilometres.
    pub fn length_km(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.cumulative_distance_km)
            .unwrap_or(0.0)
    }

    pub fn origin(&self) -> &GeoPoint {
        &self.points[0].position
    }

    pub fn destination(&self) -> &GeoPoint {
        &self.points[self.points.len() - 1].position
    }

    /// Consecutive vertex pairs, each a leg of non-zero length.
    pub fn legs(&self) -> impl Iterator<Item = (&RoutePoint, &RoutePoint)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }
}
