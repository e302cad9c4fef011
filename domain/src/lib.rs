//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conference
//!
//! A conference is a moderated discussion between simulated participants:
//!
//! - **Stages**: waiting → introduction → discussion → conclusion → ended,
//!   strictly forward
//! - **Rounds**: each discussion round is opened by a chair, followed by
//!   every other active participant in list order
//! - **Transcript**: append-only, every message attributed to a known
//!   participant or the moderator
//!
//! ## Scheduling
//!
//! [`TurnScheduler`] is a pure policy: given a conference and a round it
//! decides the chair, the speaking order and the context each speaker sees.

pub mod conference;
pub mod core;
pub mod prompt;
pub mod scenario;
pub mod schedule;

// Re-export commonly used types
pub use conference::{
    CommandParseError, Conference, ConferenceCommand, ConferenceConfig, ConferenceEvent,
    ConferenceSnapshot, DEFAULT_CHAIR_ID, MODERATOR_ID, Message, MessagePage, Participant, Stage,
    entities::{DEFAULT_LANGUAGE, DEFAULT_ROUNDS, MAX_ROUNDS, MIN_ROUNDS},
};
pub use core::error::DomainError;
pub use prompt::PromptTemplate;
pub use scenario::Scenario;
pub use schedule::{ContextWindow, RoundPlan, Turn, TurnScheduler};
