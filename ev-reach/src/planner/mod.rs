//! Reachability analysis.
//!
//! This module implements the core feasibility algorithm that answers:
//! "Starting with this much range, can I drive this route, and where would
//! I run out?"
//!
//! Stations are first projected onto the route's distance axis, then a
//! single greedy sweep tracks how far the vehicle can get between charges.
//! Everything here is pure and synchronous.

mod config;
mod project;
mod reach;


pub use config::{
    AnalysisConfig, DEFAULT_MAX_RANGE_KM, DEFAULT_PROXIMITY_THRESHOLD_KM, InvalidAnalysisConfig,
};
pub use project::{ProjectedStation, StationLayout, locate_on_route, project_stations};
pub use reach::{
    RangeBudget, ReachError, ReachabilityResult, UnreachableSegment, analyze_reachability,
};
