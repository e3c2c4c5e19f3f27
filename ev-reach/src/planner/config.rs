//! Configuration for reachability analysis.

/// Default maximum lateral distance between a station and the route.
pub const DEFAULT_PROXIMITY_THRESHOLD_KM: f64 = 5.0;

/// Default full-charge range when a request does not specify one.
pub const DEFAULT_MAX_RANGE_KM: f64 = 400.0;

/// Error returned when a configuration value is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid analysis config: {field} must be finite and positive, got {value}")]
pub struct InvalidAnalysisConfig {
    pub field: &'static str,
    pub value: f64,
}

/// Configuration parameters for reachability analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Stations further than this from the route are ignored (km).
    pub proximity_threshold_km: f64,

    /// Full-charge range used when the request omits one (km).
    pub default_max_range_km: f64,
}

impl AnalysisConfig {
    /// Create a validated configuration.
    pub fn new(
        proximity_threshold_km: f64,
        default_max_range_km: f64,
    ) -> Result<Self, InvalidAnalysisConfig> {
        let config = Self {
            proximity_threshold_km,
            default_max_range_km,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is finite and positive.
    pub fn validate(&self) -> Result<(), InvalidAnalysisConfig> {
        for (field, value) in [
            ("proximity_threshold_km", self.proximity_threshold_km),
            ("default_max_range_km", self.default_max_range_km),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidAnalysisConfig { field, value });
            }
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_km: DEFAULT_PROXIMITY_THRESHOLD_KM,
            default_max_range_km: DEFAULT_MAX_RANGE_KM,
        }
    }
}
