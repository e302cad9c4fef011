//! Observer configuration from TOML (`[observers]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw observer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileObserversConfig {
    /// Per-event delivery timeout before a connection is dropped
    pub delivery_timeout_ms: u64,
    /// Write every event to this JSONL file
    pub transcript_log: Option<PathBuf>,
}

impl Default for FileObserversConfig {
    fn default() -> Self {
        Self {
            delivery_timeout_ms: 5000,
            transcript_log: None,
        }
    }
}

impl FileObserversConfig {
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }
}
