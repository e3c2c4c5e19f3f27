//! Autobahn API charging station listing.
//!
//! The Autobahn GmbH traffic API lists service facilities per motorway,
//! including electric charging stations. This module fetches those listings
//! and converts them into domain [`ChargingStation`](crate::domain::ChargingStation)s.
//!
//! Key characteristics of the API:
//! - Listings are per road and include stations on connecting roads, so
//!   records are filtered by the road named in their title
//! - Coordinates and flags are sent as strings

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{AutobahnClient, AutobahnConfig, DEFAULT_BASE_URL};
pub use convert::{ConversionError, convert_station, convert_station_list};
pub use error::AutobahnError;
pub use mock::MockStationSource;
pub use types::{ChargingStationDto, ChargingStationList, CoordinateDto};
