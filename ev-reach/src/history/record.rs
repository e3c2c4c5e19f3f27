//! Persisted outcome of one analysis request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::ErrorKind;
use crate::planner::ReachabilityResult;

/// One entry in the route history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub city1: String,
    pub city2: String,
    /// Road as given in the request, possibly not a valid road id.
    pub road: String,
    pub outcome: RouteOutcome,
    pub recorded_at: DateTime<Utc>,
}

/// What happened to the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Analysis ran to completion.
    Analysed {
        result: ReachabilityResult,
        route_length_km: f64,
    },
    /// Analysis failed before producing a verdict.
    Failed { kind: ErrorKind, message: String },
}

impl RouteRecord {
    /// Record a completed analysis, stamped with the current time.
    pub fn analysed(
        city1: impl Into<String>,
        city2: impl Into<String>,
        road: impl Into<String>,
        result: ReachabilityResult,
        route_length_km: f64,
    ) -> Self {
        Self {
            city1: city1.into(),
            city2: city2.into(),
            road: road.into(),
            outcome: RouteOutcome::Analysed {
                result,
                route_length_km,
            },
            recorded_at: Utc::now(),
        }
    }

    /// Record a failed analysis, stamped with the current time.
    pub fn failed(
        city1: impl Into<String>,
        city2: impl Into<String>,
        road: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            city1: city1.into(),
            city2: city2.into(),
            road: road.into(),
            outcome: RouteOutcome::Failed {
                kind,
                message: message.into(),
            },
            recorded_at: Utc::now(),
        }
    }

    /// Whether the analysis produced a verdict.
    pub fn is_analysed(&self) -> bool {
        matches!(self.outcome, RouteOutcome::Analysed { .. })
    }
}
