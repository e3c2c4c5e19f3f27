//! Google Directions API response DTOs.

use serde::Deserialize;

/// Response from `/directions/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// "OK", "ZERO_RESULTS", "NOT_FOUND", "OVER_QUERY_LIMIT", "REQUEST_DENIED", ...
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    /// Simplified geometry of the whole route.
    pub overview_polyline: EncodedPolyline,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub distance: Option<TextValue>,
}

/// A measured quantity with a display string, e.g. `{"text": "229 km", "value": 229114}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}
