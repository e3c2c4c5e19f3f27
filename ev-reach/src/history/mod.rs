//! Route history: a persistent log of every analysis request and its outcome.

mod error;
mod log;
mod record;

pub use error::HistoryError;
pub use log::{DEFAULT_HISTORY_PATH, JsonLinesRouteLog, MemoryRouteLog, RouteLog};
pub use record::{RouteOutcome, RouteRecord};
