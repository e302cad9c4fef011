//! JSONL file writer for conference events.
//!
//! Each [`ConferenceEvent`] is serialized as a single JSON line carrying its
//! `type`, the conference id and a `timestamp`, appended to the file via a
//! buffered writer.

use async_trait::async_trait;
use roundtable_application::{DeliveryError, ObserverConnection};
use roundtable_domain::ConferenceEvent;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL transcript logger that writes one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line and
/// on `Drop`.
pub struct JsonlTranscriptLogger {
    id: String,
    conference_id: String,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Create a new logger for one conference writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>, conference_id: impl Into<String>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create transcript log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            id: format!("jsonl:{}", path.display()),
            conference_id: conference_id.into(),
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: &ConferenceEvent) -> Result<String, DeliveryError> {
        let mut record =
            serde_json::to_value(event).map_err(|e| DeliveryError::Io(e.to_string()))?;
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        if let Value::Object(map) = &mut record {
            map.insert(
                "conference_id".to_string(),
                Value::String(self.conference_id.clone()),
            );
            map.insert("timestamp".to_string(), Value::String(timestamp));
        }

        serde_json::to_string(&record).map_err(|e| DeliveryError::Io(e.to_string()))
    }
}

#[async_trait]
impl ObserverConnection for JsonlTranscriptLogger {
    fn id(&self) -> &str {
        &self.id
    }

    async fn deliver(&self, event: &ConferenceEvent) -> Result<(), DeliveryError> {
        let line = self.record(event)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| DeliveryError::Io("transcript writer poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    async fn close(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{Message, Participant, Stage};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.jsonl");
        let logger = JsonlTranscriptLogger::new(&path, "conf-1").unwrap();

        let speaker = Participant::new("gm", "Alice", "General Manager");
        logger
            .deliver(&ConferenceEvent::StageChanged {
                stage: Stage::Introduction,
            })
            .await
            .unwrap();
        logger
            .deliver(&ConferenceEvent::message_appended(Message::new(
                &speaker,
                "Good morning.",
            )))
            .await
            .unwrap();
        logger.close().await;

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["conference_id"], "conf-1");
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "stage_changed");
        assert_eq!(lines[1]["type"], "message_appended");
        assert_eq!(lines[1]["message"]["text"], "Good morning.");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("t.jsonl");
        let logger = JsonlTranscriptLogger::new(&path, "conf-2").unwrap();
        assert_eq!(logger.path(), path.as_path());
        assert!(logger.id().starts_with("jsonl:"));
        assert!(path.exists());
    }

    #[test]
    fn test_returns_none_when_parent_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("t.jsonl");
        assert!(JsonlTranscriptLogger::new(&path, "conf-3").is_none());
    }
}
