//! Fixture-backed station source for running without API access.
//!
//! Loads station listings from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{ChargingStation, RoadId};

use super::convert::convert_station_list;
use super::error::AutobahnError;
use super::types::ChargingStationList;

/// Station source that serves listings from JSON files.
///
/// Expects files named `{ROAD}.json` (e.g. `A2.json`) containing the same
/// body the Autobahn API returns.
#[derive(Debug, Clone)]
pub struct MockStationSource {
    listings: Arc<HashMap<RoadId, ChargingStationList>>,
}

impl MockStationSource {
    /// Load every `*.json` listing in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, AutobahnError> {
        let data_dir = data_dir.as_ref();
        let mut listings = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| AutobahnError::Fixture {
            message: format!("failed to read fixture directory {}: {e}", data_dir.display()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| AutobahnError::Fixture {
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| AutobahnError::Fixture {
                    message: format!("invalid filename: {}", path.display()),
                })?;

            let road = RoadId::parse(stem).map_err(|e| AutobahnError::Fixture {
                message: format!("{}: {e}", path.display()),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| AutobahnError::Fixture {
                message: format!("failed to read {}: {e}", path.display()),
            })?;

            let list: ChargingStationList =
                serde_json::from_str(&json).map_err(|e| AutobahnError::Fixture {
                    message: format!("failed to parse {}: {e}", path.display()),
                })?;

            listings.insert(road, list);
        }

        if listings.is_empty() {
            return Err(AutobahnError::Fixture {
                message: format!("no station fixtures found in {}", data_dir.display()),
            });
        }

        Ok(Self {
            listings: Arc::new(listings),
        })
    }

    /// Charging stations for a road, converted exactly like live data.
    pub fn charging_stations(&self, road: &RoadId) -> Result<Vec<ChargingStation>, AutobahnError> {
        let list = self
            .listings
            .get(road)
            .ok_or_else(|| AutobahnError::UnknownRoad(road.clone()))?;
        Ok(convert_station_list(list, road))
    }

    /// Roads with fixture data, sorted.
    pub fn available_roads(&self) -> Vec<RoadId> {
        let mut roads: Vec<RoadId> = self.listings.keys().cloned().collect();
        roads.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        roads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const A7_BODY: &str = r#"{
        "electric_charging_station": [
            {
                "identifier": "A7-1",
                "title": "A7 | Rasthof Allertal",
                "coordinate": { "lat": "52.7", "long": "9.6" },
                "isBlocked": "false",
                "future": false
            }
        ]
    }"#;

    fn road(s: &str) -> RoadId {
        RoadId::parse(s).unwrap()
    }

    #[test]
    fn load_bundled_fixtures() {
        let source = MockStationSource::new("data/stations").unwrap();
        assert!(source.available_roads().contains(&road("A2")));

        let stations = source.charging_stations(&road("A2")).unwrap();
        assert!(!stations.is_empty());
        assert!(stations.iter().all(|s| s.road == road("A2")));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("A7.json"), A7_BODY).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = MockStationSource::new(dir.path()).unwrap();
        assert_eq!(source.available_roads(), vec![road("A7")]);

        let stations = source.charging_stations(&road("a7")).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "A7-1");
    }

    #[test]
    fn unknown_road_returns_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("A7.json"), A7_BODY).unwrap();

        let source = MockStationSource::new(dir.path()).unwrap();
        assert!(matches!(
            source.charging_stations(&road("A1")),
            Err(AutobahnError::UnknownRoad(_))
        ));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            MockStationSource::new(dir.path()),
            Err(AutobahnError::Fixture { .. })
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("A7.json"), "{ not json").unwrap();
        assert!(matches!(
            MockStationSource::new(dir.path()),
            Err(AutobahnError::Fixture { .. })
        ));
    }
}
