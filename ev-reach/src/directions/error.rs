//! Directions API error types.

use super::polyline::PolylineError;

/// Errors that can occur when fetching route geometry.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No driving route connects the two points
    #[error("no driving route found")]
    NoRoute,

    /// Invalid API key or API not enabled
    #[error("request denied: {0}")]
    Unauthorized(String),

    /// Rate limited by the API
    #[error("rate limited by directions API")]
    RateLimited,

    /// API reported an error
    #[error("API error {status}: {message}")]
    Api { status: String, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Route geometry could not be decoded
    #[error("invalid route geometry: {0}")]
    Polyline(#[from] PolylineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DirectionsError::NoRoute.to_string(), "no driving route found");

        let err = DirectionsError::Api {
            status: "INVALID_REQUEST".into(),
            message: "missing origin".into(),
        };
        assert_eq!(err.to_string(), "API error INVALID_REQUEST: missing origin");

        let err = DirectionsError::from(PolylineError::Truncated { position: 3 });
        assert_eq!(
            err.to_string(),
            "invalid route geometry: polyline truncated at position 3"
        );
    }
}
