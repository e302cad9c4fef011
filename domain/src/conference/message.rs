//! Transcript message entity

use super::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single contribution in a conference transcript (Entity)
///
/// Speaker name and title are copied at write time so the transcript is
/// never rewritten by later participant edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub speaker_id: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(speaker: &Participant, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker_id: speaker.id.clone(),
            speaker_name: speaker.name.clone(),
            speaker_title: speaker.title.clone(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// `"{name} ({title}): {text}"`, the attributed form used in summaries.
    pub fn attributed(&self) -> String {
        format!("{} ({}): {}", self.speaker_name, self.speaker_title, self.text)
    }
}

/// A page of transcript messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    pub total: usize,
    pub messages: Vec<Message>,
}
