//! Request orchestration: from city names to a reachability report.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{GeoPoint, Route, distance_km};
use crate::history::{RouteLog, RouteRecord};
use crate::planner::{
    AnalysisConfig, ProjectedStation, ReachabilityResult, analyze_reachability, project_stations,
};

use super::error::AnalysisError;
use super::providers::{Geocoder, RouteGeometry, StationSource};
use super::request::AnalysisRequest;

/// Default time allowed for all provider calls of one request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub request: AnalysisRequest,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub straight_line_distance_km: f64,
    pub route_length_km: f64,
    /// Usable stations, ordered by distance along the route.
    pub stations_on_route: Vec<ProjectedStation>,
    pub result: ReachabilityResult,
}

/// Runs analyses against injected providers and records every outcome.
pub struct RouteAnalyzer<G, R, S, L> {
    geocoder: G,
    directions: R,
    stations: S,
    log: L,
    config: AnalysisConfig,
    timeout: Duration,
}

impl<G, R, S, L> RouteAnalyzer<G, R, S, L>
where
    G: Geocoder,
    R: RouteGeometry,
    S: StationSource,
    L: RouteLog,
{
    /// Create an analyzer with the default request timeout.
    pub fn new(geocoder: G, directions: R, stations: S, log: L, config: AnalysisConfig) -> Self {
        Self {
            geocoder,
            directions,
            stations,
            log,
            config,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the time allowed for provider calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The route history this analyzer writes to.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Analyse one request and record its outcome.
    ///
    /// A failure to write the history is logged and does not affect the
    /// returned result.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let outcome = self.run(&request).await;

        let record = match &outcome {
            Ok(report) => RouteRecord::analysed(
                &request.city1,
                &request.city2,
                &request.road,
                report.result.clone(),
                report.route_length_km,
            ),
            Err(e) => {
                warn!(
                    city1 = %request.city1,
                    city2 = %request.city2,
                    road = %request.road,
                    kind = %e.kind(),
                    error = %e,
                    "analysis failed"
                );
                RouteRecord::failed(
                    &request.city1,
                    &request.city2,
                    &request.road,
                    e.kind(),
                    e.to_string(),
                )
            }
        };

        if let Err(e) = self.log.record(&record).await {
            warn!(error = %e, "failed to record route history");
        }

        outcome
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let validated = request.validate(&self.config)?;
        let budget = validated.budget()?;

        let fetch = async {
            let (origin, destination) = tokio::try_join!(
                self.geocode(validated.city1()),
                self.geocode(validated.city2()),
            )?;
            debug!(%origin, %destination, "geocoded cities");

            let (geometry, stations) = tokio::try_join!(
                async {
                    self.directions
                        .route(&origin, &destination)
                        .await
                        .map_err(AnalysisError::from)
                },
                async {
                    self.stations
                        .charging_stations(validated.road())
                        .await
                        .map_err(AnalysisError::from)
                },
            )?;

            Ok::<_, AnalysisError>((origin, destination, geometry, stations))
        };

        let (origin, destination, geometry, stations) = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| AnalysisError::Timeout {
                after: self.timeout,
            })??;

        let route = Route::build(&geometry)?;
        let layout = project_stations(&route, &stations, self.config.proximity_threshold_km);
        let result = analyze_reachability(&route, &layout, budget);

        info!(
            city1 = validated.city1(),
            city2 = validated.city2(),
            road = %validated.road(),
            route_length_km = route.length_km(),
            stations = layout.len(),
            is_possible = result.is_possible,
            gaps = result.unreachable_segments.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            request: request.clone(),
            origin,
            destination,
            straight_line_distance_km: distance_km(&origin, &destination),
            route_length_km: route.length_km(),
            stations_on_route: layout.into_stations(),
            result,
        })
    }

    async fn geocode(&self, city: &str) -> Result<GeoPoint, AnalysisError> {
        Ok(self.geocoder.geocode(city).await?)
    }
}
