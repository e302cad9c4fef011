//! Observer-issued control commands

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A control command sent by an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConferenceCommand {
    /// Run exactly one more discussion round
    NextRound,
    /// Skip remaining rounds and conclude
    EndConference,
}

/// Why a raw command payload was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Malformed command payload: {0}")]
    Malformed(String),

    #[error("Unrecognized command type: {0}")]
    Unrecognized(String),
}

impl ConferenceCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextRound => "next_round",
            Self::EndConference => "end_conference",
        }
    }

    /// Parse a raw JSON payload such as `{"type":"next_round"}`.
    ///
    /// Extra fields are ignored.
    pub fn parse(raw: &str) -> Result<Self, CommandParseError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CommandParseError::Malformed(e.to_string()))?;

        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| CommandParseError::Malformed("missing \"type\" field".to_string()))?;

        match kind {
            "next_round" => Ok(Self::NextRound),
            "end_conference" => Ok(Self::EndConference),
            other => Err(CommandParseError::Unrecognized(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConferenceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(
            ConferenceCommand::parse(r#"{"type":"next_round"}"#),
            Ok(ConferenceCommand::NextRound)
        );
        assert_eq!(
            ConferenceCommand::parse(r#"{"type":"end_conference","reason":"late"}"#),
            Ok(ConferenceCommand::EndConference)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ConferenceCommand::parse("not json"),
            Err(CommandParseError::Malformed(_))
        ));
        assert!(matches!(
            ConferenceCommand::parse(r#"{"kind":"next_round"}"#),
            Err(CommandParseError::Malformed(_))
        ));
        assert_eq!(
            ConferenceCommand::parse(r#"{"type":"pause"}"#),
            Err(CommandParseError::Unrecognized("pause".to_string()))
        );
    }

    #[test]
    fn test_serialize_matches_parse() {
        let json = serde_json::to_string(&ConferenceCommand::EndConference).unwrap();
        assert_eq!(json, r#"{"type":"end_conference"}"#);
        assert_eq!(
            ConferenceCommand::parse(&json),
            Ok(ConferenceCommand::EndConference)
        );
    }
}
