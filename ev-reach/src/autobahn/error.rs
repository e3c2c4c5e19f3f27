//! Autobahn API error types.

use crate::domain::RoadId;

/// Errors that can occur when listing charging stations.
#[derive(Debug, thiserror::Error)]
pub enum AutobahnError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API does not know this road
    #[error("unknown road: {0}")]
    UnknownRoad(RoadId),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
