//! Application-level configuration.
//!
//! - [`OrchestrationSettings`] - progression mode, start trigger, summary temperature
//! - [`Pacing`] - delays between turns

pub mod orchestration;
pub mod pacing;

pub use orchestration::{OrchestrationSettings, ProgressionMode};
pub use pacing::Pacing;
