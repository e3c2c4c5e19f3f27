//! Google Directions HTTP client.

use tracing::debug;

use crate::domain::GeoPoint;

use super::error::DirectionsError;
use super::polyline::decode_polyline;
use super::types::DirectionsResponse;

/// Default base URL for Google Maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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

/// Google Directions API client.
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleDirectionsClient {
    /// Create a new Directions client.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Fetch the driving route geometry between two points.
    pub async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, DirectionsError> {
        let url = format!("{}/directions/json", self.base_url);
        debug!(%origin, %destination, "fetching driving route");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("mode", "driving".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16().to_string(),
                message: body,
            });
        }

        let body = response.text().await?;
        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        route_geometry(&directions)
    }
}

/// Extract the decoded geometry of the first route in a response.
pub fn route_geometry(response: &DirectionsResponse) -> Result<Vec<GeoPoint>, DirectionsError> {
    let message = || response.error_message.clone().unwrap_or_default();

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(DirectionsError::NoRoute),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => return Err(DirectionsError::RateLimited),
        "REQUEST_DENIED" => return Err(DirectionsError::Unauthorized(message())),
        other => {
            return Err(DirectionsError::Api {
                status: other.to_string(),
                message: message(),
            });
        }
    }

    let route = response.routes.first().ok_or(DirectionsError::NoRoute)?;
    let points = decode_polyline(&route.overview_polyline.points)?;

    debug!(
        points = points.len(),
        summary = route.summary.as_deref().unwrap_or(""),
        "decoded route geometry"
    );

    Ok(points)
}
