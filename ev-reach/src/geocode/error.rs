//! Geocoding error types.

/// Errors that can occur when resolving a city name.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No place matches the name
    #[error("no location found for {city:?}")]
    NotFound { city: String },

    /// Rate limited by the geocoding service
    #[error("rate limited by geocoding service")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON or coordinates
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound {
            city: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "no location found for \"Atlantis\"");

        let err = GeocodeError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");
    }
}
