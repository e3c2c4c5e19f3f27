//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate is non-finite or outside its valid range
    #[error("invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },

    /// A coordinate string is not a decimal number
    #[error("unparsable coordinate: {0:?}")]
    UnparsableCoordinate(String),

    /// The route geometry cannot be turned into a distance profile
    #[error("invalid route: {reason} ({points} usable points)")]
    InvalidRoute { reason: &'static str, points: usize },
}
