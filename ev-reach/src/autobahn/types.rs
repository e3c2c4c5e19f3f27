//! Autobahn API response DTOs.
//!
//! These types map directly to the JSON served by
//! `/{road}/services/electric_charging_station`. Coordinates arrive as
//! decimal strings and flags as `"true"`/`"false"` strings, so conversion to
//! domain types happens separately.

use serde::{Deserialize, Serialize};

/// Response listing the charging stations on one road.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChargingStationList {
    #[serde(default)]
    pub electric_charging_station: Vec<ChargingStationDto>,
}

/// A charging station record.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStationDto {
    /// Opaque identifier (base64 in practice).
    pub identifier: String,

    /// Usually "{road} | {place}", e.g. "A2 | Raststätte Lehrter See Nord".
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    pub coordinate: Option<CoordinateDto>,

    /// "true" when the station is closed.
    #[serde(default)]
    pub is_blocked: Option<String>,

    /// Planned but not yet opened.
    #[serde(default)]
    pub future: bool,

    #[serde(default)]
    pub description: Vec<String>,
}

/// Coordinate pair as decimal strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoordinateDto {
    pub lat: String,
    pub long: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_api_body() {
        let body = r#"{
            "electric_charging_station": [
                {
                    "extent": "10.7,52.4,10.8,52.5",
                    "identifier": "RUxFQ1RSSUNfQ0hBUkdJTkdfU1RBVElPTl9fMTczMzM=",
                    "routeRecommendation": [],
                    "coordinate": { "lat": "52.376270", "long": "10.184120" },
                    "footer": [],
                    "icon": "charging_plug_strong",
                    "isBlocked": "false",
                    "description": ["AC Ladepunkt", "Ladepunkt: 2"],
                    "title": "A2 | Raststätte Zweidorfer Holz Nord",
                    "point": "10.184120,52.376270",
                    "display_type": "STRONG_ELECTRIC_CHARGING_STATION",
                    "future": false,
                    "subtitle": "Zweidorfer Holz Nord"
                }
            ]
        }"#;

        let list: ChargingStationList = serde_json::from_str(body).unwrap();
        assert_eq!(list.electric_charging_station.len(), 1);

        let dto = &list.electric_charging_station[0];
        assert_eq!(dto.title, "A2 | Raststätte Zweidorfer Holz Nord");
        assert_eq!(dto.is_blocked.as_deref(), Some("false"));
        assert!(!dto.future);
        assert_eq!(dto.coordinate.as_ref().unwrap().long, "10.184120");
    }

    #[test]
    fn missing_list_is_empty() {
        let list: ChargingStationList = serde_json::from_str("{}").unwrap();
        assert!(list.electric_charging_station.is_empty());
    }
}
