//! Charging station and road identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// Error returned when parsing an invalid road identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid road identifier {input:?}: {reason}")]
pub struct InvalidRoadId {
    input: String,
    reason: &'static str,
}

impl InvalidRoadId {
    /// Why the input was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A motorway identifier such as `A2` or `A100`.
///
/// Road identifiers are ASCII letters and digits, at most 10 characters,
/// stored upper-case.
///
/// # Examples
///
/// ```
/// use ev_reach::domain::RoadId;
///
/// let a2 = RoadId::parse(" a2 ").unwrap();
/// assert_eq!(a2.as_str(), "A2");
///
/// assert!(RoadId::parse("").is_err());
/// assert!(RoadId::parse("A 2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoadId(String);

impl RoadId {
    /// Parse a road identifier, trimming whitespace and normalizing case.
    pub fn parse(s: &str) -> Result<Self, InvalidRoadId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidRoadId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }

        if trimmed.len() > 10 {
            return Err(InvalidRoadId {
                input: s.to_string(),
                reason: "must be at most 10 characters",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidRoadId {
                input: s.to_string(),
                reason: "must contain only ASCII letters and digits",
            });
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoadId {
    type Error = InvalidRoadId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoadId> for String {
    fn from(value: RoadId) -> Self {
        value.0
    }
}

impl fmt::Debug for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoadId({})", self.0)
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A charging station as listed by the station provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargingStation {
    /// Provider-assigned identifier (opaque).
    pub id: String,

    /// Human-readable name, e.g. "A2 | Raststätte Lehrter See".
    pub name: String,

    pub position: GeoPoint,

    /// False when the station is closed, blocked or not yet opened.
    pub operational: bool,

    /// The road the station serves.
    pub road: RoadId,
}
