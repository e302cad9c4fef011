//! Conference definition files
//!
//! A conference file names the topic and the participants. Anything it does
//! not set is taken from the `[conference]` section of the loaded config.
//!
//! ```toml
//! topic = "Should we enter the Southeast Asian market?"
//! rounds = 2
//!
//! [[participants]]
//! id = "gm"
//! name = "Alice"
//! title = "General Manager"
//! personality = "Decisive and pragmatic"
//! expertise = "Operations"
//! ```

use super::error::ConfigError;
use super::file_config::FileConferenceConfig;
use roundtable_domain::{ConferenceConfig, Participant};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw conference definition (TOML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceFile {
    pub topic: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub chair: Option<String>,
    #[serde(default)]
    pub scenario: Option<String>,
}

impl ConferenceFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Merge with config defaults into a domain conference config.
    ///
    /// The result is not validated here; conference creation does that.
    pub fn into_config(self, defaults: &FileConferenceConfig) -> ConferenceConfig {
        let mut config = ConferenceConfig::new(self.topic, self.participants)
            .with_rounds(self.rounds.unwrap_or(defaults.rounds))
            .with_language(self.language.unwrap_or_else(|| defaults.language.clone()));

        if let Some(chair) = self.chair.or_else(|| defaults.chair.clone()) {
            config = config.with_chair(chair);
        }
        if let Some(scenario) = self.scenario.or_else(|| defaults.parse_scenario().0) {
            config = config.with_scenario(scenario);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BOARD_MEETING: &str = r#"
topic = "Should we enter the Southeast Asian market?"
rounds = 2

[[participants]]
id = "gm"
name = "Alice"
title = "General Manager"
personality = "Decisive"

[[participants]]
id = "cfo"
name = "Bob"
title = "CFO"
temperature = 0.4

[[participants]]
id = "intern"
name = "Carol"
title = "Intern"
is_active = false
"#;

    #[test]
    fn test_parse_conference_file() {
        let file = ConferenceFile::parse(BOARD_MEETING).unwrap();
        assert_eq!(file.participants.len(), 3);
        assert_eq!(file.rounds, Some(2));
        assert_eq!(file.participants[1].temperature, Some(0.4));
        assert!(!file.participants[2].is_active);
        assert!(file.participants[0].expertise.is_empty());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let defaults = FileConferenceConfig {
            rounds: 4,
            language: "French".to_string(),
            chair: Some("cfo".to_string()),
            ..Default::default()
        };
        let config = ConferenceFile::parse(BOARD_MEETING)
            .unwrap()
            .into_config(&defaults);

        assert_eq!(config.rounds, 2);
        assert_eq!(config.language, "French");
        assert_eq!(config.chair.as_deref(), Some("cfo"));
        assert_eq!(config.active_speaker_count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_scenario_applies() {
        let defaults = FileConferenceConfig {
            scenario: Some("brainstorming".to_string()),
            ..Default::default()
        };
        let config = ConferenceFile::parse(BOARD_MEETING)
            .unwrap()
            .into_config(&defaults);
        assert_eq!(config.scenario.as_deref(), Some("brainstorming"));
    }

    #[test]
    fn test_missing_topic_is_parse_error() {
        assert!(ConferenceFile::parse("rounds = 2").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BOARD_MEETING.as_bytes()).unwrap();

        let loaded = ConferenceFile::load(file.path()).unwrap();
        assert_eq!(loaded.topic, "Should we enter the Southeast Asian market?");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConferenceFile::load(Path::new("/nonexistent/board.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/board.toml"));
    }
}
