//! Driving route geometry via the Google Directions API.
//!
//! The API returns the route's overview geometry as an encoded polyline,
//! which is decoded into an ordered list of points from origin to
//! destination.

mod client;
mod error;
mod polyline;
mod types;

pub use client::{DEFAULT_BASE_URL, DirectionsConfig, GoogleDirectionsClient, route_geometry};
pub use error::DirectionsError;
pub use polyline::{PolylineError, decode_polyline};
pub use types::{DirectionsLeg, DirectionsResponse, DirectionsRoute, EncodedPolyline, TextValue};
