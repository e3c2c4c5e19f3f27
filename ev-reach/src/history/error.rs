//! Route history error types.

/// Errors that can occur when reading or writing the route history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Filesystem operation failed
    #[error("history I/O error: {message}")]
    Io { message: String },

    /// Record could not be serialized
    #[error("failed to serialize record: {message}")]
    Serialize { message: String },

    /// Stored line could not be parsed
    #[error("corrupt history record on line {line}: {message}")]
    Corrupt { line: usize, message: String },
}
