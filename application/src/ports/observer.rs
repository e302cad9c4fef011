//! Observer connection port
//!
//! An observer is a passive watcher of one conference. Transports (console,
//! websocket, log file) implement [`ObserverConnection`]; the broadcast hub
//! only ever sees this trait.

use async_trait::async_trait;
use roundtable_domain::ConferenceEvent;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while delivering an event to one observer
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Connection closed")]
    Closed,

    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeliveryError {
    fn from(err: std::io::Error) -> Self {
        DeliveryError::Io(err.to_string())
    }
}

/// A registered observer of one conference
#[async_trait]
pub trait ObserverConnection: Send + Sync {
    /// Identifier used in logs and for explicit unsubscribe
    fn id(&self) -> &str;

    /// Deliver one event. A failure removes the connection from the hub.
    async fn deliver(&self, event: &ConferenceEvent) -> Result<(), DeliveryError>;

    /// Called when the hub releases the connection.
    async fn close(&self) {}
}

/// Observer backed by a bounded channel
///
/// The receiving half is the observer's event stream; it ends once the hub
/// drops the connection.
pub struct ChannelObserver {
    id: String,
    sender: mpsc::Sender<ConferenceEvent>,
    timeout: Duration,
}

impl ChannelObserver {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(id: impl Into<String>, timeout: Duration) -> (Self, mpsc::Receiver<ConferenceEvent>) {
        Self::with_capacity(id, Self::DEFAULT_CAPACITY, timeout)
    }

    pub fn with_capacity(
        id: impl Into<String>,
        capacity: usize,
        timeout: Duration,
    ) -> (Self, mpsc::Receiver<ConferenceEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                id: id.into(),
                sender,
                timeout,
            },
            receiver,
        )
    }
}

#[async_trait]
impl ObserverConnection for ChannelObserver {
    fn id(&self) -> &str {
        &self.id
    }

    async fn deliver(&self, event: &ConferenceEvent) -> Result<(), DeliveryError> {
        match tokio::time::timeout(self.timeout, self.sender.send(event.clone())).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(DeliveryError::Closed),
            Err(_) => Err(DeliveryError::Timeout(self.timeout)),
        }
    }
}
