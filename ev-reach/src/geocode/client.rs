//! Nominatim (OpenStreetMap) geocoding client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::domain::GeoPoint;

use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim rejects requests without an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("ev-reach/", env!("CARGO_PKG_VERSION"));

/// A search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for Nominatim's `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Invalid user agent".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to coordinates, using the best match.
    pub async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        debug!(%city, "geocoding");

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let places: Vec<PlaceDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        best_match(city, &places)
    }
}

/// Convert the first search hit into a point.
pub fn best_match(city: &str, places: &[PlaceDto]) -> Result<GeoPoint, GeocodeError> {
    let place = places.first().ok_or_else(|| GeocodeError::NotFound {
        city: city.to_string(),
    })?;

    GeoPoint::parse(&place.lat, &place.lon).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("ev-reach/"));
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        assert!(NominatimClient::new(NominatimConfig::new()).is_ok());

        let bad = NominatimConfig::new().with_user_agent("bad\nagent");
        assert!(NominatimClient::new(bad).is_err());
    }

    #[test]
    fn best_match_parses_first_hit() {
        let body = r#"[
            {"lat": "52.4205588", "lon": "10.7861682", "display_name": "Wolfsburg, Niedersachsen"},
            {"lat": "1.0", "lon": "1.0"}
        ]"#;
        let places: Vec<PlaceDto> = serde_json::from_str(body).unwrap();

        let point = best_match("Wolfsburg", &places).unwrap();
        assert_eq!(point, GeoPoint::new(52.4205588, 10.7861682).unwrap());
    }

    #[test]
    fn empty_result_is_not_found() {
        let err = best_match("Atlantis", &[]).unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound { city } if city == "Atlantis"));
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let places = vec![PlaceDto {
            lat: "north".into(),
            lon: "10.0".into(),
            display_name: None,
        }];
        assert!(matches!(
            best_match("X", &places),
            Err(GeocodeError::Json { .. })
        ));
    }
}
