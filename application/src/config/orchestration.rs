//! Orchestration settings: how a conference is driven.
//!
//! [`OrchestrationSettings`] groups the parameters that control the
//! orchestrator's loop. These are application-layer concerns, not domain
//! policy.

use super::pacing::Pacing;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Who advances discussion rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionMode {
    /// The background driver runs every round, then concludes
    #[default]
    Automatic,
    /// The driver runs round 1, then waits for advance commands
    Manual,
}

impl ProgressionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressionMode::Automatic => "automatic",
            ProgressionMode::Manual => "manual",
        }
    }
}

impl FromStr for ProgressionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "automatic" | "auto" => Ok(ProgressionMode::Automatic),
            "manual" => Ok(ProgressionMode::Manual),
            other => Err(format!(
                "unknown progression mode '{}' (expected automatic or manual)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ProgressionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orchestration loop control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationSettings {
    pub pacing: Pacing,
    pub progression: ProgressionMode,
    /// Start the driver as soon as a conference is created
    pub auto_start: bool,
    /// Temperature for the moderator's summary
    pub summary_temperature: f32,
}

impl Default for OrchestrationSettings {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            progression: ProgressionMode::Automatic,
            auto_start: true,
            summary_temperature: 0.5,
        }
    }
}

impl OrchestrationSettings {
    /// Default settings without any pacing delay.
    pub fn immediate() -> Self {
        Self::default().with_pacing(Pacing::none())
    }

    // ==================== Builder Methods ====================

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_progression(mut self, progression: ProgressionMode) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn with_summary_temperature(mut self, temperature: f32) -> Self {
        self.summary_temperature = temperature;
        self
    }
}
