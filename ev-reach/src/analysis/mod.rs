//! Request orchestration around the reachability core.
//!
//! An analysis validates the request, resolves both cities, fetches the
//! driving route and the road's charging stations, and then hands fully
//! materialized inputs to the pure planner. Every outcome is written to the
//! route history.

mod error;
mod orchestrator;
mod providers;
mod request;

#[cfg(test)]
mod orchestrator_tests;

pub use error::{AnalysisError, ErrorKind};
pub use orchestrator::{AnalysisReport, DEFAULT_REQUEST_TIMEOUT, RouteAnalyzer};
pub use providers::{Geocoder, RouteGeometry, StationBackend, StationSource};
pub use request::{AnalysisRequest, ValidatedRequest, ValidationError};
