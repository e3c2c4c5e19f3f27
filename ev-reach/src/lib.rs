//! Electric vehicle reachability analysis.
//!
//! Answers: "with this much charge left, can I drive from one city to
//! another along this motorway, and if not, which stretches are out of
//! range?"

pub mod analysis;
pub mod autobahn;
pub mod cache;
pub mod config;
pub mod directions;
pub mod domain;
pub mod geocode;
pub mod history;
pub mod planner;
