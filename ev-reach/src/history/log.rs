//! Route history storage backends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::error::HistoryError;
use super::record::RouteRecord;

/// Default history file name.
pub const DEFAULT_HISTORY_PATH: &str = "route_history.jsonl";

/// Append-only store of analysis outcomes.
#[allow(async_fn_in_trait)]
pub trait RouteLog {
    /// Append one record.
    async fn record(&self, record: &RouteRecord) -> Result<(), HistoryError>;

    /// All records in insertion order.
    async fn records(&self) -> Result<Vec<RouteRecord>, HistoryError>;
}

impl<T: RouteLog> RouteLog for &T {
    async fn record(&self, record: &RouteRecord) -> Result<(), HistoryError> {
        (**self).record(record).await
    }

    async fn records(&self) -> Result<Vec<RouteRecord>, HistoryError> {
        (**self).records().await
    }
}

/// In-memory history, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteLog {
    records: Arc<RwLock<Vec<RouteRecord>>>,
}

impl MemoryRouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RouteLog for MemoryRouteLog {
    async fn record(&self, record: &RouteRecord) -> Result<(), HistoryError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn records(&self) -> Result<Vec<RouteRecord>, HistoryError> {
        Ok(self.records.read().await.clone())
    }
}

/// History stored as one JSON object per line.
///
/// Writes are serialized so concurrent appends never interleave.
#[derive(Debug)]
pub struct JsonLinesRouteLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesRouteLog {
    /// Create a log backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the history file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonLinesRouteLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_PATH)
    }
}

impl RouteLog for JsonLinesRouteLog {
    async fn record(&self, record: &RouteRecord) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(record).map_err(|e| HistoryError::Serialize {
            message: e.to_string(),
        })?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HistoryError::Io {
                    message: format!("failed to create history directory: {}", e),
                })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| HistoryError::Io {
                message: format!("failed to open {}: {}", self.path.display(), e),
            })?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| HistoryError::Io {
                message: format!("failed to append record: {}", e),
            })?;
        file.flush().await.map_err(|e| HistoryError::Io {
            message: format!("failed to flush history: {}", e),
        })?;

        debug!(path = %self.path.display(), "appended route record");
        Ok(())
    }

    async fn records(&self) -> Result<Vec<RouteRecord>, HistoryError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(HistoryError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| HistoryError::Corrupt {
                    line: i + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }
}
