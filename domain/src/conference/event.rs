//! Events pushed to conference observers

use super::message::Message;
use super::stage::Stage;
use serde::{Deserialize, Serialize};

/// An event delivered to observers of one conference
///
/// Serialized as a JSON object tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConferenceEvent {
    /// Snapshot sent to a newly registered observer before any live event
    ConnectionInitialized {
        stage: Stage,
        current_round: u32,
        messages: Vec<Message>,
    },
    StageChanged {
        stage: Stage,
    },
    RoundStarted {
        round: u32,
    },
    MessageAppended {
        message: Message,
        current_speaker: String,
    },
    RoundCompleted {
        round: u32,
    },
    Error {
        message: String,
    },
}

impl ConferenceEvent {
    pub fn message_appended(message: Message) -> Self {
        let current_speaker = message.speaker_id.clone();
        Self::MessageAppended {
            message,
            current_speaker,
        }
    }

    /// Wire name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionInitialized { .. } => "connection_initialized",
            Self::StageChanged { .. } => "stage_changed",
            Self::RoundStarted { .. } => "round_started",
            Self::MessageAppended { .. } => "message_appended",
            Self::RoundCompleted { .. } => "round_completed",
            Self::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conference::participant::Participant;

    #[test]
    fn test_stage_changed_wire_format() {
        let event = ConferenceEvent::StageChanged {
            stage: Stage::Discussion,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"stage_changed","stage":"discussion"}"#);
    }

    #[test]
    fn test_message_appended_carries_speaker() {
        let speaker = Participant::new("cfo", "Dana", "Financial manager");
        let event = ConferenceEvent::message_appended(Message::new(&speaker, "Budget is tight."));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "message_appended");
        assert_eq!(value["current_speaker"], "cfo");
        assert_eq!(value["message"]["speakerName"], "Dana");
    }

    #[test]
    fn test_kind_matches_tag() {
        let events = vec![
            ConferenceEvent::ConnectionInitialized {
                stage: Stage::Waiting,
                current_round: 0,
                messages: vec![],
            },
            ConferenceEvent::RoundStarted { round: 1 },
            ConferenceEvent::RoundCompleted { round: 1 },
            ConferenceEvent::Error {
                message: "boom".to_string(),
            },
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.kind());
        }
    }
}
