//! City name geocoding via Nominatim.

mod client;
mod error;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NominatimClient, NominatimConfig, PlaceDto, best_match,
};
pub use error::GeocodeError;
