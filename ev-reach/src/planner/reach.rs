//! Reachability sweep over a route's charging layout.
//!
//! The vehicle drives from position 0 towards the route length `L`. It can
//! cover `current_range_km` before its first recharge and `max_range_km`
//! after charging at any station it reaches. A single greedy pass over the
//! stations (ascending by position) tracks the *frontier*: the farthest
//! position reachable without another charge.
//!
//! When the next station lies beyond the frontier, the stretch between the
//! frontier and that station is unreachable. The sweep then assumes the
//! vehicle is resupplied to full range at that station and carries on, so a
//! single route can report several disjoint unreachable segments. If no
//! station lies beyond a gap, the gap extends to `L`.
//!
//! The reported segments are therefore exactly the gaps in
//! `[0, current] ∪ ⋃ [p, p + max]` over all station positions `p`, clipped to
//! `[0, L]`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::Route;

use super::project::StationLayout;

/// Error from reachability analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReachError {
    /// A range value is negative, non-finite or inconsistent
    #[error("invalid range: {field} = {value} ({reason})")]
    InvalidRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// The vehicle's range before and after recharging.
///
/// # Examples
///
/// ```
/// use ev_reach::planner::RangeBudget;
///
/// let budget = RangeBudget::new(150.0, 200.0).unwrap();
/// assert_eq!(budget.current_range_km(), 150.0);
///
/// // Current range can never exceed a full charge
/// assert!(RangeBudget::new(100.0, 50.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBudget {
    current_range_km: f64,
    max_range_km: f64,
}

impl RangeBudget {
    /// Create a range budget.
    ///
    /// Fails if `max_range_km` is not positive, `current_range_km` is
    /// negative, either is non-finite, or the current range exceeds the
    /// maximum.
    pub fn new(current_range_km: f64, max_range_km: f64) -> Result<Self, ReachError> {
        if !max_range_km.is_finite() || max_range_km <= 0.0 {
            return Err(ReachError::InvalidRange {
                field: "max_range_km",
                value: max_range_km,
                reason: "must be finite and positive",
            });
        }
        if !current_range_km.is_finite() || current_range_km < 0.0 {
            return Err(ReachError::InvalidRange {
                field: "current_range_km",
                value: current_range_km,
                reason: "must be finite and non-negative",
            });
        }
        if current_range_km > max_range_km {
            return Err(ReachError::InvalidRange {
                field: "current_range_km",
                value: current_range_km,
                reason: "exceeds max_range_km",
            });
        }
        Ok(Self {
            current_range_km,
            max_range_km,
        })
    }

    pub fn current_range_km(&self) -> f64 {
        self.current_range_km
    }

    pub fn max_range_km(&self) -> f64 {
        self.max_range_km
    }
}

/// A stretch of the route the vehicle cannot cross.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnreachableSegment {
    pub start_distance_km: f64,
    pub end_distance_km: f64,
}

impl UnreachableSegment {
    pub fn length_km(&self) -> f64 {
        self.end_distance_km - self.start_distance_km
    }
}

/// Verdict of a reachability analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachabilityResult {
    pub is_possible: bool,

    /// Non-overlapping, ascending by start.
    pub unreachable_segments: Vec<UnreachableSegment>,
}

impl ReachabilityResult {
    /// Sum of the lengths of all unreachable segments.
    pub fn unreachable_km(&self) -> f64 {
        self.unreachable_segments.iter().map(|s| s.length_km()).sum()
    }
}

/// Decide whether the route can be driven, and where it cannot.
pub fn analyze_reachability(
    route: &Route,
    layout: &StationLayout,
    budget: RangeBudget,
) -> ReachabilityResult {
    sweep(route.length_km(), layout.positions(), budget)
}

/// Greedy frontier sweep over ascending station positions.
pub(crate) fn sweep(
    route_length_km: f64,
    positions: impl IntoIterator<Item = f64>,
    budget: RangeBudget,
) -> ReachabilityResult {
    let mut positions = positions.into_iter().peekable();
    let mut frontier = budget.current_range_km;
    let mut segments = Vec::new();

    loop {
        // Charge at every station within reach; `p == frontier` is reachable.
        while let Some(p) = positions.next_if(|&p| p <= frontier) {
            frontier = frontier.max(p + budget.max_range_km);
        }

        if frontier >= route_length_km {
            break;
        }

        match positions.next() {
            Some(resume_at) => {
                trace!(
                    start = frontier,
                    end = resume_at,
                    "gap before next station"
                );
                segments.push(UnreachableSegment {
                    start_distance_km: frontier,
                    end_distance_km: resume_at.min(route_length_km),
                });
                frontier = resume_at + budget.max_range_km;
            }
            None => {
                trace!(start = frontier, end = route_length_km, "gap to destination");
                segments.push(UnreachableSegment {
                    start_distance_km: frontier,
                    end_distance_km: route_length_km,
                });
                break;
            }
        }
    }

    ReachabilityResult {
        is_possible: segments.is_empty(),
        unreachable_segments: segments,
    }
}
