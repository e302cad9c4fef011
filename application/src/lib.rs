//! Application layer for roundtable
//!
//! This crate contains the conference store, broadcast hub, orchestrator,
//! command processor, port definitions and orchestration settings.
//! It depends only on the domain layer.

pub mod command;
pub mod config;
pub mod error;
pub mod hub;
pub mod orchestrator;
pub mod ports;
pub mod store;

// Re-export commonly used types
pub use command::CommandProcessor;
pub use config::{OrchestrationSettings, Pacing, ProgressionMode};
pub use error::ConferenceError;
pub use hub::BroadcastHub;
pub use orchestrator::ConferenceOrchestrator;
pub use ports::{
    observer::{ChannelObserver, DeliveryError, ObserverConnection},
    response_generator::{GenerationError, GenerationRequest, ResponseGenerator, UtteranceKind},
};
pub use store::{ConferenceHandle, ConferenceStore, DEFAULT_MESSAGE_LIMIT};
