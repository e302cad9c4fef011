//! Pacing between turns.
//!
//! Delays emulate the cadence of a human meeting and throttle the
//! generation call rate. They are cooperative sleeps, never taken while the
//! conference state is locked.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays inserted after each kind of utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    pub after_welcome: Duration,
    pub after_introduction: Duration,
    pub after_chair: Duration,
    pub after_participant: Duration,
    pub after_handoff: Duration,
    pub after_summary: Duration,
    /// After fixed (non-generated) messages
    pub after_message: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_welcome: Duration::from_millis(1000),
            after_introduction: Duration::from_millis(3000),
            after_chair: Duration::from_millis(3000),
            after_participant: Duration::from_millis(4000),
            after_handoff: Duration::from_millis(2000),
            after_summary: Duration::from_millis(3000),
            after_message: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            after_welcome: Duration::ZERO,
            after_introduction: Duration::ZERO,
            after_chair: Duration::ZERO,
            after_participant: Duration::ZERO,
            after_handoff: Duration::ZERO,
            after_summary: Duration::ZERO,
            after_message: Duration::ZERO,
        }
    }
}
