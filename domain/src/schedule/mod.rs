//! Turn scheduling
//!
//! Round planning: chair selection, speaking order, context windows and
//! per-round topics.

mod round_topic;
pub mod scheduler;

pub use round_topic::round_topic;
pub use scheduler::{
    CHAIR_CONTEXT_WINDOW, ContextWindow, RoundPlan, SPEAKER_CONTEXT_WINDOW,
    SUMMARY_CONTEXT_WINDOW, Turn, TurnScheduler,
};
