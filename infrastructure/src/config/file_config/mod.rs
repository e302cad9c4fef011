//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings
//! with [`FileConfig::to_settings`].

mod conference;
mod generation;
mod observers;
mod output;
mod pacing;

pub use conference::FileConferenceConfig;
pub use generation::FileGenerationConfig;
pub use observers::FileObserversConfig;
pub use output::FileOutputConfig;
pub use pacing::FilePacingConfig;

pub use super::validation::{ConfigIssue, Severity};
use roundtable_application::OrchestrationSettings;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Defaults for every conference
    pub conference: FileConferenceConfig,
    /// Delays between turns
    pub pacing: FilePacingConfig,
    /// Text generation backend
    pub generation: FileGenerationConfig,
    /// Observer delivery and transcript logging
    pub observers: FileObserversConfig,
    /// Terminal output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.conference.validate());
        issues.extend(self.generation.validate());

        if self.observers.delivery_timeout_ms == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "observers.delivery_timeout_ms",
                "delivery timeout must be positive",
            ));
        }

        issues
    }

    /// Build the orchestration settings these values describe.
    pub fn to_settings(&self) -> OrchestrationSettings {
        OrchestrationSettings::default()
            .with_pacing(self.pacing.to_pacing())
            .with_progression(self.conference.parse_progression().0)
            .with_auto_start(self.conference.auto_start)
            .with_summary_temperature(self.generation.summary_temperature)
    }
}
