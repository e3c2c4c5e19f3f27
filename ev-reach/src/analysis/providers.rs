//! Capability interfaces for the external collaborators of an analysis.
//!
//! The orchestrator is generic over these traits so that tests can inject
//! in-memory providers and the binary can choose backends at start-up.

use crate::autobahn::{AutobahnClient, AutobahnError, MockStationSource};
use crate::cache::CachedStationSource;
use crate::directions::{DirectionsError, GoogleDirectionsClient};
use crate::domain::{ChargingStation, GeoPoint, RoadId};
use crate::geocode::{GeocodeError, NominatimClient};

/// Resolves city names to coordinates.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// Fails with [`GeocodeError::NotFound`] when the city is unknown.
    async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError>;
}

/// Supplies the driving path between two points.
#[allow(async_fn_in_trait)]
pub trait RouteGeometry {
    /// Ordered points from `origin` to `destination`.
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, DirectionsError>;
}

/// Lists the charging stations along a road.
#[allow(async_fn_in_trait)]
pub trait StationSource {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        (**self).geocode(city).await
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        NominatimClient::geocode(self, city).await
    }
}

impl RouteGeometry for GoogleDirectionsClient {
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, DirectionsError> {
        GoogleDirectionsClient::route(self, origin, destination).await
    }
}

impl StationSource for AutobahnClient {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        AutobahnClient::charging_stations(self, road).await
    }
}

impl StationSource for MockStationSource {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        MockStationSource::charging_stations(self, road)
    }
}

/// Where station listings come from.
pub enum StationBackend {
    /// The Autobahn API, behind a cache.
    Live(CachedStationSource<AutobahnClient>),
    /// Fixture files on disk.
    Fixtures(MockStationSource),
}

impl StationSource for StationBackend {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        match self {
            StationBackend::Live(source) => source.charging_stations(road).await,
            StationBackend::Fixtures(source) => {
                StationSource::charging_stations(source, road).await
            }
        }
    }
}
