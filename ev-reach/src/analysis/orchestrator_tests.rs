//! Orchestrator tests with in-memory providers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;
use crate::autobahn::AutobahnError;
use crate::directions::DirectionsError;
use crate::domain::{ChargingStation, EARTH_RADIUS_KM, GeoPoint, RoadId};
use crate::geocode::GeocodeError;
use crate::history::{HistoryError, MemoryRouteLog, RouteLog, RouteOutcome, RouteRecord};
use crate::planner::{AnalysisConfig, UnreachableSegment};

/// Kilometres per degree of latitude along a meridian.
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Longitude of the synthetic north-south test road.
const ROAD_LON: f64 = 10.0;
const ORIGIN_LAT: f64 = 50.0;

/// Point `km` north of the origin on the test road, offset `east_km` sideways.
fn at_km(km: f64, east_km: f64) -> GeoPoint {
    let lat = ORIGIN_LAT + km / KM_PER_DEGREE;
    let lon_scale = KM_PER_DEGREE * lat.to_radians().cos();
    GeoPoint::new(lat, ROAD_LON + east_km / lon_scale).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

struct MapGeocoder {
    cities: HashMap<String, GeoPoint>,
    calls: AtomicUsize,
}

impl MapGeocoder {
    /// "Start" at km 0 and "End" at km 300.
    fn new() -> Self {
        let mut cities = HashMap::new();
        cities.insert("Start".to_string(), at_km(0.0, 0.0));
        cities.insert("End".to_string(), at_km(300.0, 0.0));
        Self {
            cities,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Geocoder for MapGeocoder {
    async fn geocode(&self, city: &str) -> Result<GeoPoint, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cities
            .get(city)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                city: city.to_string(),
            })
    }
}

/// Straight road from origin to destination with intermediate points every 10 km.
struct StraightRoad;

impl RouteGeometry for StraightRoad {
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, DirectionsError> {
        let total = (destination.latitude() - origin.latitude()) * KM_PER_DEGREE;
        let steps = (total / 10.0).ceil().max(1.0) as usize;
        Ok((0..=steps)
            .map(|i| at_km(total * i as f64 / steps as f64, 0.0))
            .collect())
    }
}

struct NoRoute;

impl RouteGeometry for NoRoute {
    async fn route(&self, _: &GeoPoint, _: &GeoPoint) -> Result<Vec<GeoPoint>, DirectionsError> {
        Err(DirectionsError::NoRoute)
    }
}

struct SlowRoad;

impl RouteGeometry for SlowRoad {
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<GeoPoint>, DirectionsError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(vec![*origin, *destination])
    }
}

struct DegenerateRoad;

impl RouteGeometry for DegenerateRoad {
    async fn route(&self, origin: &GeoPoint, _: &GeoPoint) -> Result<Vec<GeoPoint>, DirectionsError> {
        Ok(vec![*origin, *origin])
    }
}

/// Stations on road A2 at the given (km along, km sideways, operational) spots.
struct FixedStations {
    stations: Vec<ChargingStation>,
}

impl FixedStations {
    fn new(spots: &[(f64, f64, bool)]) -> Self {
        let road = RoadId::parse("A2").unwrap();
        let stations = spots
            .iter()
            .enumerate()
            .map(|(i, &(km, east, operational))| ChargingStation {
                id: format!("S{i}"),
                name: format!("Station {i}"),
                position: at_km(km, east),
                operational,
                road: road.clone(),
            })
            .collect();
        Self { stations }
    }
}

impl StationSource for FixedStations {
    async fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        if road.as_str() != "A2" {
            return Err(AutobahnError::UnknownRoad(road.clone()));
        }
        Ok(self.stations.clone())
    }
}

struct BrokenLog;

impl RouteLog for BrokenLog {
    async fn record(&self, _: &RouteRecord) -> Result<(), HistoryError> {
        Err(HistoryError::Io {
            message: "disk full".into(),
        })
    }

    async fn records(&self) -> Result<Vec<RouteRecord>, HistoryError> {
        Ok(Vec::new())
    }
}

fn analyzer<R: RouteGeometry>(
    directions: R,
    stations: FixedStations,
) -> RouteAnalyzer<MapGeocoder, R, FixedStations, MemoryRouteLog> {
    RouteAnalyzer::new(
        MapGeocoder::new(),
        directions,
        stations,
        MemoryRouteLog::new(),
        AnalysisConfig::default(),
    )
}

fn request(current: f64, max: f64) -> AnalysisRequest {
    AnalysisRequest::new("Start", "End", "A2", current).with_max_range(max)
}

#[tokio::test]
async fn feasible_trip_with_one_charge() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[(140.0, 0.0, true)]));

    let report = analyzer.analyze(request(150.0, 200.0)).await.unwrap();

    assert!(report.result.is_possible);
    assert!(report.result.unreachable_segments.is_empty());
    assert_close(report.route_length_km, 300.0);
    assert_close(report.straight_line_distance_km, 300.0);
    assert_eq!(report.stations_on_route.len(), 1);
    assert_close(report.stations_on_route[0].distance_along_route_km, 140.0);
}

#[tokio::test]
async fn gap_is_reported_and_sweep_resumes() {
    let analyzer = analyzer(
        StraightRoad,
        FixedStations::new(&[(260.0, 0.0, true), (80.0, 0.0, true)]),
    );

    let report = analyzer.analyze(request(100.0, 150.0)).await.unwrap();

    assert!(!report.result.is_possible);
    assert_eq!(report.result.unreachable_segments.len(), 1);
    let UnreachableSegment {
        start_distance_km,
        end_distance_km,
    } = report.result.unreachable_segments[0];
    assert_close(start_distance_km, 230.0);
    assert_close(end_distance_km, 260.0);

    let positions: Vec<f64> = report
        .stations_on_route
        .iter()
        .map(|s| s.distance_along_route_km)
        .collect();
    assert!(positions[0] < positions[1]);
}

#[tokio::test]
async fn far_and_broken_stations_are_ignored() {
    let analyzer = analyzer(
        StraightRoad,
        FixedStations::new(&[(140.0, 20.0, true), (150.0, 0.0, false)]),
    );

    let report = analyzer.analyze(request(150.0, 200.0)).await.unwrap();

    assert!(report.stations_on_route.is_empty());
    assert!(!report.result.is_possible);
    assert_close(report.result.unreachable_segments[0].start_distance_km, 150.0);
    assert_close(report.result.unreachable_segments[0].end_distance_km, 300.0);
}

#[tokio::test]
async fn default_max_range_applies() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[(200.0, 0.0, true)]));

    let report = analyzer
        .analyze(AnalysisRequest::new("Start", "End", "A2", 250.0))
        .await
        .unwrap();

    assert!(report.result.is_possible);
}

#[tokio::test]
async fn success_is_recorded() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[]));

    analyzer.analyze(request(50.0, 100.0)).await.unwrap();

    let records = analyzer.log().records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city1, "Start");
    assert_eq!(records[0].road, "A2");
    match &records[0].outcome {
        RouteOutcome::Analysed {
            result,
            route_length_km,
        } => {
            assert!(!result.is_possible);
            assert_close(*route_length_km, 300.0);
        }
        other => panic!("expected analysed outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn validation_failure_skips_providers_and_is_recorded() {
    let geocoder = MapGeocoder::new();
    let analyzer = RouteAnalyzer::new(
        &geocoder,
        StraightRoad,
        FixedStations::new(&[]),
        MemoryRouteLog::new(),
        AnalysisConfig::default(),
    );

    let err = analyzer.analyze(request(100.0, 50.0)).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Validation(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);

    let records = analyzer.log().records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(matches!(
        records[0].outcome,
        RouteOutcome::Failed {
            kind: ErrorKind::Validation,
            ..
        }
    ));
}

#[tokio::test]
async fn zero_max_range_is_invalid_range() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[]));

    let err = analyzer.analyze(request(0.0, 0.0)).await.unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidRange(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[]));

    let err = analyzer
        .analyze(AnalysisRequest::new("Start", "Atlantis", "A2", 50.0))
        .await
        .unwrap_err();

    assert!(matches!(&err, AnalysisError::GeocodeNotFound { city } if city == "Atlantis"));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let records = analyzer.log().records().await.unwrap();
    assert!(!records[0].is_analysed());
}

#[tokio::test]
async fn unknown_road_is_not_found() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[]));

    let err = analyzer
        .analyze(AnalysisRequest::new("Start", "End", "A9", 50.0))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Stations(AutobahnError::UnknownRoad(_))));
}

#[tokio::test]
async fn missing_route_is_reported() {
    let analyzer = analyzer(NoRoute, FixedStations::new(&[]));

    let err = analyzer.analyze(request(50.0, 100.0)).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Directions(DirectionsError::NoRoute)));
}

#[tokio::test]
async fn degenerate_route_is_invalid_data() {
    let analyzer = analyzer(DegenerateRoad, FixedStations::new(&[]));

    let err = analyzer.analyze(request(50.0, 100.0)).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Route(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[tokio::test]
async fn slow_providers_time_out() {
    let analyzer =
        analyzer(SlowRoad, FixedStations::new(&[])).with_timeout(Duration::from_millis(50));

    let err = analyzer.analyze(request(50.0, 100.0)).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Timeout { .. }));
    assert_eq!(err.kind(), ErrorKind::Timeout);

    let records = analyzer.log().records().await.unwrap();
    assert!(matches!(
        records[0].outcome,
        RouteOutcome::Failed {
            kind: ErrorKind::Timeout,
            ..
        }
    ));
}

#[tokio::test]
async fn borrowed_log_receives_records() {
    let log = MemoryRouteLog::new();
    let analyzer = RouteAnalyzer::new(
        MapGeocoder::new(),
        StraightRoad,
        FixedStations::new(&[]),
        &log,
        AnalysisConfig::default(),
    );

    analyzer.analyze(request(50.0, 100.0)).await.unwrap();
    analyzer
        .analyze(AnalysisRequest::new("Start", "Atlantis", "A2", 50.0))
        .await
        .unwrap_err();

    let records = log.records().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].is_analysed());
    assert!(!records[1].is_analysed());
}

#[tokio::test]
async fn history_failure_does_not_change_outcome() {
    let analyzer = RouteAnalyzer::new(
        MapGeocoder::new(),
        StraightRoad,
        FixedStations::new(&[(140.0, 0.0, true)]),
        BrokenLog,
        AnalysisConfig::default(),
    );

    let report = analyzer.analyze(request(150.0, 200.0)).await.unwrap();
    assert!(report.result.is_possible);
}

#[tokio::test]
async fn report_serializes_to_json() {
    let analyzer = analyzer(StraightRoad, FixedStations::new(&[(140.0, 0.0, true)]));

    let report = analyzer.analyze(request(150.0, 200.0)).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["request"]["city1"], "Start");
    assert_eq!(json["result"]["is_possible"], true);
    assert_eq!(json["stations_on_route"][0]["station"]["road"], "A2");
}
