//! Conference defaults from TOML (`[conference]` section)

use super::{ConfigIssue, Severity};
use roundtable_application::ProgressionMode;
use roundtable_domain::{DEFAULT_LANGUAGE, DEFAULT_ROUNDS, MAX_ROUNDS, MIN_ROUNDS, Scenario};
use serde::{Deserialize, Serialize};

/// Raw conference defaults
///
/// Values here apply to every conference file that does not set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConferenceConfig {
    pub rounds: u32,
    pub language: String,
    pub chair: Option<String>,
    pub scenario: Option<String>,
    /// "automatic" or "manual"
    pub progression: String,
    /// Start as soon as the conference is created
    pub auto_start: bool,
}

impl Default for FileConferenceConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            language: DEFAULT_LANGUAGE.to_string(),
            chair: None,
            scenario: None,
            progression: ProgressionMode::Automatic.as_str().to_string(),
            auto_start: true,
        }
    }
}

impl FileConferenceConfig {
    /// Parse the progression mode, falling back to automatic.
    pub fn parse_progression(&self) -> (ProgressionMode, Vec<ConfigIssue>) {
        match self.progression.parse::<ProgressionMode>() {
            Ok(mode) => (mode, vec![]),
            Err(e) => (
                ProgressionMode::Automatic,
                vec![ConfigIssue::new(
                    Severity::Warning,
                    "conference.progression",
                    format!("{}, falling back to 'automatic'", e),
                )],
            ),
        }
    }

    /// The scenario name if it names a built-in preset.
    pub fn parse_scenario(&self) -> (Option<String>, Vec<ConfigIssue>) {
        let Some(name) = self.scenario.as_deref() else {
            return (None, vec![]);
        };
        match Scenario::preset(name) {
            Some(scenario) => (Some(scenario.name), vec![]),
            None => (
                None,
                vec![ConfigIssue::new(
                    Severity::Warning,
                    "conference.scenario",
                    format!(
                        "unknown scenario '{}' (available: {}), running without one",
                        name,
                        Scenario::PRESETS.join(", ")
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&self.rounds) {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "conference.rounds",
                format!(
                    "rounds must be between {} and {}, got {}",
                    MIN_ROUNDS, MAX_ROUNDS, self.rounds
                ),
            ));
        }
        if self.language.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "conference.language",
                "language is empty; prompts will not name a response language",
            ));
        }
        issues.extend(self.parse_progression().1);
        issues.extend(self.parse_scenario().1);

        issues
    }
}
