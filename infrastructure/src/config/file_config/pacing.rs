//! Pacing configuration from TOML (`[pacing]` section)

use roundtable_application::Pacing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw pacing delays in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingConfig {
    pub after_welcome_ms: u64,
    pub after_introduction_ms: u64,
    pub after_chair_ms: u64,
    pub after_participant_ms: u64,
    pub after_handoff_ms: u64,
    pub after_summary_ms: u64,
    pub after_message_ms: u64,
}

impl Default for FilePacingConfig {
    fn default() -> Self {
        Self {
            after_welcome_ms: 1000,
            after_introduction_ms: 3000,
            after_chair_ms: 3000,
            after_participant_ms: 4000,
            after_handoff_ms: 2000,
            after_summary_ms: 3000,
            after_message_ms: 500,
        }
    }
}

impl FilePacingConfig {
    pub fn to_pacing(&self) -> Pacing {
        Pacing {
            after_welcome: Duration::from_millis(self.after_welcome_ms),
            after_introduction: Duration::from_millis(self.after_introduction_ms),
            after_chair: Duration::from_millis(self.after_chair_ms),
            after_participant: Duration::from_millis(self.after_participant_ms),
            after_handoff: Duration::from_millis(self.after_handoff_ms),
            after_summary: Duration::from_millis(self.after_summary_ms),
            after_message: Duration::from_millis(self.after_message_ms),
        }
    }
}
