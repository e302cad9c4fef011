//! Conference domain
//!
//! The conference state record, its participants, transcript messages and
//! the events and commands exchanged with observers.

pub mod command;
pub mod entities;
pub mod event;
pub mod message;
pub mod participant;
pub mod stage;

pub use command::{CommandParseError, ConferenceCommand};
pub use entities::{Conference, ConferenceConfig, ConferenceSnapshot};
pub use event::ConferenceEvent;
pub use message::{Message, MessagePage};
pub use participant::{DEFAULT_CHAIR_ID, DEFAULT_TEMPERATURE, MODERATOR_ID, Participant};
pub use stage::Stage;
