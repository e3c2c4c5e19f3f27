//! Analysis error types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::autobahn::AutobahnError;
use crate::directions::DirectionsError;
use crate::domain::DomainError;
use crate::geocode::GeocodeError;
use crate::planner::ReachError;

use super::request::ValidationError;

/// Coarse classification of an analysis failure, for mapping to a
/// user-facing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself was malformed.
    Validation,
    /// A city, road or route does not exist.
    NotFound,
    /// A provider failed or refused the request.
    Upstream,
    /// A provider returned data that cannot be analysed.
    InvalidData,
    /// Providers did not answer in time.
    Timeout,
    /// Local failure unrelated to the request.
    Internal,
}

impl ErrorKind {
    /// Whether the failure is the caller's to fix.
    pub fn is_user_error(self) -> bool {
        matches!(self, ErrorKind::Validation | ErrorKind::NotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Upstream => "upstream",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Everything that can go wrong while analysing one request.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("city not found: {city}")]
    GeocodeNotFound { city: String },

    #[error("geocoding failed: {0}")]
    Geocoding(GeocodeError),

    #[error("route lookup failed: {0}")]
    Directions(#[from] DirectionsError),

    #[error("station listing failed: {0}")]
    Stations(#[from] AutobahnError),

    #[error("invalid route: {0}")]
    Route(#[from] DomainError),

    #[error("{0}")]
    InvalidRange(#[from] ReachError),

    #[error("providers did not respond within {}s", .after.as_secs())]
    Timeout { after: Duration },
}

impl From<GeocodeError> for AnalysisError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NotFound { city } => AnalysisError::GeocodeNotFound { city },
            other => AnalysisError::Geocoding(other),
        }
    }
}

impl AnalysisError {
    /// Classify the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Validation(_) | AnalysisError::InvalidRange(_) => ErrorKind::Validation,
            AnalysisError::GeocodeNotFound { .. } => ErrorKind::NotFound,
            AnalysisError::Geocoding(_) => ErrorKind::Upstream,
            AnalysisError::Directions(e) => match e {
                DirectionsError::NoRoute => ErrorKind::NotFound,
                DirectionsError::Polyline(_) => ErrorKind::InvalidData,
                _ => ErrorKind::Upstream,
            },
            AnalysisError::Stations(e) => match e {
                AutobahnError::UnknownRoad(_) => ErrorKind::NotFound,
                AutobahnError::Fixture { .. } => ErrorKind::Internal,
                _ => ErrorKind::Upstream,
            },
            AnalysisError::Route(_) => ErrorKind::InvalidData,
            AnalysisError::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}
