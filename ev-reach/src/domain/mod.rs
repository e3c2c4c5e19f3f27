//! Domain types for charging-range analysis.
//!
//! This module contains the core domain model types: validated coordinates,
//! route distance profiles and charging stations. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod error;
mod geo;
mod route;
mod station;

pub use error::DomainError;
pub use geo::{EARTH_RADIUS_KM, GeoPoint, SegmentProjection, distance_km, project_onto_segment};
pub use route::{Route, RoutePoint};
pub use station::{ChargingStation, InvalidRoadId, RoadId};
