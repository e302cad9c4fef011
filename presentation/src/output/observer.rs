//! Terminal observer
//!
//! Prints every event it receives through an [`OutputFormatter`].

use crate::output::formatter::OutputFormatter;
use async_trait::async_trait;
use roundtable_application::{DeliveryError, ObserverConnection};
use roundtable_domain::ConferenceEvent;
use std::io::Write;
use std::sync::Mutex;

/// Observer writing formatted events to a terminal (or any writer)
pub struct ConsoleObserver {
    id: String,
    formatter: Box<dyn OutputFormatter>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleObserver {
    /// Observer printing to stdout.
    pub fn stdout(formatter: Box<dyn OutputFormatter>) -> Self {
        Self::new("console", formatter, Box::new(std::io::stdout()))
    }

    pub fn new(
        id: impl Into<String>,
        formatter: Box<dyn OutputFormatter>,
        sink: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            id: id.into(),
            formatter,
            sink: Mutex::new(sink),
        }
    }
}

#[async_trait]
impl ObserverConnection for ConsoleObserver {
    fn id(&self) -> &str {
        &self.id
    }

    async fn deliver(&self, event: &ConferenceEvent) -> Result<(), DeliveryError> {
        let Some(text) = self.formatter.format_event(event) else {
            return Ok(());
        };
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| DeliveryError::Io("console writer poisoned".to_string()))?;
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    async fn close(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}
