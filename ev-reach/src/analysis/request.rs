//! Analysis request and boundary validation.

use serde::{Deserialize, Serialize};

use crate::domain::RoadId;
use crate::planner::{AnalysisConfig, RangeBudget, ReachError};

/// A request as received from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Origin city name.
    pub city1: String,
    /// Destination city name.
    pub city2: String,
    /// Road identifier, e.g. "A2".
    pub road: String,
    /// Distance the vehicle can still travel (km).
    pub current_range_km: f64,
    /// Full-charge range (km); falls back to the configured default.
    #[serde(default)]
    pub max_range_km: Option<f64>,
}

/// A request field was missing or malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A request whose fields have been checked and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    city1: String,
    city2: String,
    road: RoadId,
    current_range_km: f64,
    max_range_km: f64,
}

impl AnalysisRequest {
    /// Create a request without an explicit maximum range.
    pub fn new(
        city1: impl Into<String>,
        city2: impl Into<String>,
        road: impl Into<String>,
        current_range_km: f64,
    ) -> Self {
        Self {
            city1: city1.into(),
            city2: city2.into(),
            road: road.into(),
            current_range_km,
            max_range_km: None,
        }
    }

    /// Set the full-charge range.
    pub fn with_max_range(mut self, max_range_km: f64) -> Self {
        self.max_range_km = Some(max_range_km);
        self
    }

    /// Check the request at the boundary.
    ///
    /// Rejects blank city names, malformed road ids, non-finite or negative
    /// ranges, and a current range above the maximum. A missing maximum
    /// falls back to `config.default_max_range_km`.
    pub fn validate(&self, config: &AnalysisConfig) -> Result<ValidatedRequest, ValidationError> {
        let city1 = non_blank("city1", &self.city1)?;
        let city2 = non_blank("city2", &self.city2)?;

        let road = RoadId::parse(&self.road)
            .map_err(|e| ValidationError::new("road", e.reason()))?;

        let current_range_km = non_negative("current_range_km", self.current_range_km)?;
        let max_range_km = non_negative(
            "max_range_km",
            self.max_range_km.unwrap_or(config.default_max_range_km),
        )?;

        if current_range_km > max_range_km {
            return Err(ValidationError::new(
                "current_range_km",
                format!(
                    "current range {} km exceeds maximum range {} km",
                    current_range_km, max_range_km
                ),
            ));
        }

        Ok(ValidatedRequest {
            city1,
            city2,
            road,
            current_range_km,
            max_range_km,
        })
    }
}

impl ValidatedRequest {
    pub fn city1(&self) -> &str {
        &self.city1
    }

    pub fn city2(&self) -> &str {
        &self.city2
    }

    pub fn road(&self) -> &RoadId {
        &self.road
    }

    pub fn current_range_km(&self) -> f64 {
        self.current_range_km
    }

    /// Maximum range after applying the configured default.
    pub fn max_range_km(&self) -> f64 {
        self.max_range_km
    }

    /// The range budget for the analyzer.
    ///
    /// Fails for a zero maximum range, which passes validation.
    pub fn budget(&self) -> Result<RangeBudget, ReachError> {
        RangeBudget::new(self.current_range_km, self.max_range_km)
    }
}

fn non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}
