//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::analysis::DEFAULT_REQUEST_TIMEOUT;
use crate::history::DEFAULT_HISTORY_PATH;
use crate::planner::AnalysisConfig;

pub const PROXIMITY_THRESHOLD_VAR: &str = "EV_REACH_PROXIMITY_THRESHOLD_KM";
pub const DEFAULT_MAX_RANGE_VAR: &str = "EV_REACH_DEFAULT_MAX_RANGE_KM";
pub const REQUEST_TIMEOUT_VAR: &str = "EV_REACH_REQUEST_TIMEOUT_SECS";
pub const HISTORY_PATH_VAR: &str = "EV_REACH_HISTORY_PATH";
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const NOMINATIM_URL_VAR: &str = "EV_REACH_NOMINATIM_URL";
pub const DIRECTIONS_URL_VAR: &str = "EV_REACH_DIRECTIONS_URL";
pub const AUTOBAHN_URL_VAR: &str = "EV_REACH_AUTOBAHN_URL";

/// Errors from reading settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to build an analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub analysis: AnalysisConfig,
    /// Time allowed for all provider calls of one request.
    pub request_timeout: Duration,
    pub history_path: PathBuf,
    /// Google Maps API key; route lookups fail without it.
    pub api_key: Option<String>,
    pub nominatim_url: Option<String>,
    pub directions_url: Option<String>,
    pub autobahn_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            api_key: None,
            nominatim_url: None,
            directions_url: None,
            autobahn_url: None,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`; unset or blank variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let proximity_threshold_km = parse_or(
            PROXIMITY_THRESHOLD_VAR,
            get(PROXIMITY_THRESHOLD_VAR),
            defaults.analysis.proximity_threshold_km,
        )?;
        let default_max_range_km = parse_or(
            DEFAULT_MAX_RANGE_VAR,
            get(DEFAULT_MAX_RANGE_VAR),
            defaults.analysis.default_max_range_km,
        )?;

        let analysis = AnalysisConfig::new(proximity_threshold_km, default_max_range_km).map_err(
            |e| {
                let var = match e.field {
                    "proximity_threshold_km" => PROXIMITY_THRESHOLD_VAR,
                    _ => DEFAULT_MAX_RANGE_VAR,
                };
                ConfigError::Invalid {
                    var,
                    value: e.value.to_string(),
                    reason: "must be finite and positive".to_string(),
                }
            },
        )?;

        let timeout_secs: u64 = parse_or(
            REQUEST_TIMEOUT_VAR,
            get(REQUEST_TIMEOUT_VAR),
            defaults.request_timeout.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: REQUEST_TIMEOUT_VAR,
                value: "0".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            analysis,
            request_timeout: Duration::from_secs(timeout_secs),
            history_path: get(HISTORY_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            api_key: get(API_KEY_VAR),
            nominatim_url: get(NOMINATIM_URL_VAR),
            directions_url: get(DIRECTIONS_URL_VAR),
            autobahn_url: get(AUTOBAHN_URL_VAR),
        })
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
