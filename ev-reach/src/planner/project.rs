//! Mapping charging stations onto a route's distance axis.

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{ChargingStation, Route, SegmentProjection, project_onto_segment};

/// A charging station placed at a position along the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedStation {
    pub station: ChargingStation,

    /// Driving distance from the origin to the station's closest route point.
    pub distance_along_route_km: f64,

    /// Distance from the station to the route.
    pub lateral_offset_km: f64,
}

/// Usable charging stations ordered by position along the route.
///
/// Ordering is ascending by `distance_along_route_km`; stations at the same
/// position keep their input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StationLayout {
    stations: Vec<ProjectedStation>,
}

impl StationLayout {
    /// Create a layout, sorting the stations by position (stable).
    pub fn new(mut stations: Vec<ProjectedStation>) -> Self {
        stations.sort_by(|a, b| a.distance_along_route_km.total_cmp(&b.distance_along_route_km));
        Self { stations }
    }

    /// A layout with no stations.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &[ProjectedStation] {
        &self.stations
    }

    /// Station positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.stations.iter().map(|s| s.distance_along_route_km)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn into_stations(self) -> Vec<ProjectedStation> {
        self.stations
    }
}

/// Find the route position closest to `station`.
///
/// Every leg is tried; the one with the smallest lateral offset wins, and
/// the earliest leg wins a tie. Returns `(distance_along_route_km,
/// lateral_offset_km)`.
pub fn locate_on_route(route: &Route, station: &ChargingStation) -> (f64, f64) {
    let mut best: Option<(f64, SegmentProjection)> = None;

    for (from, to) in route.legs() {
        let projection = project_onto_segment(&station.position, &from.position, &to.position);
        let better = match &best {
            Some((_, current)) => projection.lateral_offset_km < current.lateral_offset_km,
            None => true,
        };
        if better {
            best = Some((from.cumulative_distance_km, projection));
        }
    }

    match best {
        Some((leg_start_km, projection)) => {
            let along = (leg_start_km + projection.distance_along_segment_km)
                .clamp(0.0, route.length_km());
            (along, projection.lateral_offset_km)
        }
        // Route guarantees at least one leg
        None => (0.0, f64::INFINITY),
    }
}

/// Project stations onto the route, keeping operational stations within
/// `proximity_threshold_km` of it.
pub fn project_stations(
    route: &Route,
    stations: &[ChargingStation],
    proximity_threshold_km: f64,
) -> StationLayout {
    let mut kept = Vec::with_capacity(stations.len());
    let mut not_operational = 0usize;
    let mut too_far = 0usize;

    for station in stations {
        if !station.operational {
            not_operational += 1;
            continue;
        }

        let (along, lateral) = locate_on_route(route, station);
        if lateral > proximity_threshold_km {
            trace!(
                station = %station.id,
                lateral_offset_km = lateral,
                "station too far from route"
            );
            too_far += 1;
            continue;
        }

        kept.push(ProjectedStation {
            station: station.clone(),
            distance_along_route_km: along,
            lateral_offset_km: lateral,
        });
    }

    debug!(
        total = stations.len(),
        kept = kept.len(),
        not_operational,
        too_far,
        "projected stations onto route"
    );

    StationLayout::new(kept)
}
