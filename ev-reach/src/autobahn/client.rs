//! Autobahn API HTTP client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{ChargingStation, RoadId};

use super::convert::convert_station_list;
use super::error::AutobahnError;
use super::types::ChargingStationList;

/// Default base URL for the Autobahn API.
pub const DEFAULT_BASE_URL: &str = "https://verkehr.autobahn.de/o/autobahn";

/// Configuration for the Autobahn client.
#[derive(Debug, Clone)]
pub struct AutobahnConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AutobahnConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for AutobahnConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Autobahn charging station listing.
#[derive(Debug, Clone)]
pub struct AutobahnClient {
    http: reqwest::Client,
    base_url: String,
}

impl AutobahnClient {
    /// Create a new Autobahn API client.
    pub fn new(config: AutobahnConfig) -> Result<Self, AutobahnError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn stations_url(&self, road: &RoadId) -> String {
        format!(
            "{}/{}/services/electric_charging_station",
            self.base_url,
            road.as_str()
        )
    }

    /// Fetch the raw station listing for a road.
    pub async fn fetch_list(&self, road: &RoadId) -> Result<ChargingStationList, AutobahnError> {
        let url = self.stations_url(road);
        debug!(%url, "fetching charging stations");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AutobahnError::UnknownRoad(road.clone()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AutobahnError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AutobahnError::Json {
            message: e.to_string(),
        })
    }

    /// Fetch the charging stations serving a road.
    pub async fn charging_stations(
        &self,
        road: &RoadId,
    ) -> Result<Vec<ChargingStation>, AutobahnError> {
        let list = self.fetch_list(road).await?;
        Ok(convert_station_list(&list, road))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AutobahnConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = AutobahnConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn stations_url_uses_road() {
        let client =
            AutobahnClient::new(AutobahnConfig::new().with_base_url("http://localhost/api/"))
                .unwrap();
        let road = RoadId::parse("a2").unwrap();
        assert_eq!(
            client.stations_url(&road),
            "http://localhost/api/A2/services/electric_charging_station"
        );
    }
}
