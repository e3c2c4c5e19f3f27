//! Caching layer for provider responses.
//!
//! City coordinates practically never change, so geocoding results are kept
//! for a day. Station listings change when stations are blocked or opened,
//! so they are kept for minutes. Errors are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::analysis::{Geocoder, StationSource};
use crate::autobahn::AutobahnError;
use crate::domain::{ChargingStation, GeoPoint, RoadId};
use crate::geocode::GeocodeError;

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for geocoded cities.
    pub geocode_ttl: Duration,

    /// TTL for station listings.
    pub station_ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: Duration::from_secs(24 * 60 * 60),
            station_ttl: Duration::from_secs(5 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache key for a city name: trimmed and lower-cased.
fn city_key(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Geocoder with caching.
pub struct CachedGeocoder<G> {
    inner: G,
    cities: MokaCache<String, GeoPoint>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Wrap a geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let cities = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cities }
    }

    /// Access the underlying geocoder for lookups that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of cached cities.
    pub fn entry_count(&self) -> u64 {
        self.cities.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.cities.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        let key = city_key(city);

        if let Some(point) = self.cities.get(&key).await {
            debug!(city, "geocode cache hit");
            return Ok(point);
        }

        let point = self.inner.geocode(city).await?;
        self.cities.insert(key, point).await;

        Ok(point)
    }
}

/// Station source with caching.
pub struct CachedStationSource<S> {
    inner: S,
    listings: MokaCache<RoadId, Arc<Vec<ChargingStation>>>,
}

impl<S: StationSource> CachedStationSource<S> {
    /// Wrap a station source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let listings = MokaCache::builder()
            .time_to_live(config.station_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, listings }
    }

    /// Access the underlying source for lookups that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached listings.
    pub fn entry_count(&self) -> u64 {
        self.listings.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.listings.invalidate_all();
    }
}

impl<S: StationSource> StationSource for CachedStationSource<S> {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        if let Some(cached) = self.listings.get(road).await {
            debug!(%road, stations = cached.len(), "station cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.charging_stations(road).await?;
        self.listings
            .insert(road.clone(), Arc::new(stations.clone()))
            .await;

        Ok(stations)
    }
}
