//! Conversion from Autobahn DTOs to domain types.

use tracing::{debug, warn};

use crate::domain::{ChargingStation, DomainError, GeoPoint, RoadId};

use super::types::{ChargingStationDto, ChargingStationList};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Coordinate could not be parsed or is out of range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] DomainError),
}

/// Convert a station listing into domain stations for `road`.
///
/// Records whose title does not name the road are dropped (the API lists
/// stations on connecting roads too). Malformed records are skipped with a
/// warning rather than failing the whole listing.
pub fn convert_station_list(list: &ChargingStationList, road: &RoadId) -> Vec<ChargingStation> {
    let mut stations = Vec::with_capacity(list.electric_charging_station.len());

    for dto in &list.electric_charging_station {
        if !title_names_road(&dto.title, road) {
            debug!(title = %dto.title, road = %road, "station listed for another road");
            continue;
        }

        match convert_station(dto, road) {
            Ok(station) => stations.push(station),
            Err(e) => {
                warn!(
                    identifier = %dto.identifier,
                    error = %e,
                    "skipping malformed charging station"
                );
            }
        }
    }

    stations
}

/// Convert a single record.
pub fn convert_station(
    dto: &ChargingStationDto,
    road: &RoadId,
) -> Result<ChargingStation, ConversionError> {
    if dto.identifier.is_empty() {
        return Err(ConversionError::MissingField("identifier"));
    }

    let coordinate = dto
        .coordinate
        .as_ref()
        .ok_or(ConversionError::MissingField("coordinate"))?;
    let position = GeoPoint::parse(&coordinate.lat, &coordinate.long)?;

    let blocked = dto
        .is_blocked
        .as_deref()
        .is_some_and(|b| b.trim().eq_ignore_ascii_case("true"));

    Ok(ChargingStation {
        id: dto.identifier.clone(),
        name: dto.title.clone(),
        position,
        operational: !blocked && !dto.future,
        road: road.clone(),
    })
}

/// Whether the title names the road as a whole token ("A2 | …" names A2,
/// "A20 | …" does not).
fn title_names_road(title: &str, road: &RoadId) -> bool {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| token.eq_ignore_ascii_case(road.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autobahn::types::CoordinateDto;

    fn road(s: &str) -> RoadId {
        RoadId::parse(s).unwrap()
    }

    fn dto(id: &str, title: &str, lat: &str, long: &str) -> ChargingStationDto {
        ChargingStationDto {
            identifier: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            coordinate: Some(CoordinateDto {
                lat: lat.to_string(),
                long: long.to_string(),
            }),
            is_blocked: Some("false".to_string()),
            future: false,
            description: Vec::new(),
        }
    }

    #[test]
    fn converts_valid_station() {
        let station =
            convert_station(&dto("S1", "A2 | Lehrter See", "52.37", "9.98"), &road("A2")).unwrap();

        assert_eq!(station.id, "S1");
        assert_eq!(station.name, "A2 | Lehrter See");
        assert_eq!(station.position, GeoPoint::new(52.37, 9.98).unwrap());
        assert!(station.operational);
        assert_eq!(station.road, road("A2"));
    }

    #[test]
    fn blocked_and_future_are_not_operational() {
        let mut blocked = dto("S1", "A2 | X", "52.0", "10.0");
        blocked.is_blocked = Some("TRUE".to_string());
        assert!(!convert_station(&blocked, &road("A2")).unwrap().operational);

        let mut future = dto("S2", "A2 | Y", "52.0", "10.0");
        future.future = true;
        assert!(!convert_station(&future, &road("A2")).unwrap().operational);
    }

    #[test]
    fn missing_coordinate_is_an_error() {
        let mut record = dto("S1", "A2 | X", "52.0", "10.0");
        record.coordinate = None;
        assert_eq!(
            convert_station(&record, &road("A2")),
            Err(ConversionError::MissingField("coordinate"))
        );
    }

    #[test]
    fn list_skips_malformed_and_other_roads() {
        let list = ChargingStationList {
            electric_charging_station: vec![
                dto("GOOD", "A2 | Lehrter See", "52.37", "9.98"),
                dto("BAD", "A2 | Broken", "not-a-number", "9.98"),
                dto("OTHER", "A20 | Elsewhere", "53.0", "11.0"),
                dto("", "A2 | No id", "52.0", "10.0"),
            ],
        };

        let stations = convert_station_list(&list, &road("A2"));
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "GOOD");
    }

    #[test]
    fn road_token_matching() {
        assert!(title_names_road("A2 | Rasthof", &road("A2")));
        assert!(title_names_road("Rasthof (a2)", &road("A2")));
        assert!(!title_names_road("A20 | Rasthof", &road("A2")));
        assert!(!title_names_road("Rasthof", &road("A2")));
    }
}
