//! Conference entities

use super::message::{Message, MessagePage};
use super::participant::{DEFAULT_CHAIR_ID, MODERATOR_ID, Participant};
use super::stage::Stage;
use crate::core::error::DomainError;
use crate::scenario::Scenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_ROUNDS: u32 = 1;
pub const MAX_ROUNDS: u32 = 20;
pub const DEFAULT_ROUNDS: u32 = 3;
pub const MIN_ACTIVE_PARTICIPANTS: usize = 2;
pub const DEFAULT_LANGUAGE: &str = "English";

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Request to create a conference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceConfig {
    pub topic: String,
    pub participants: Vec<Participant>,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_language")]
    pub language: String,
    /// Explicit chair participant id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chair: Option<String>,
    /// Scenario preset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl ConferenceConfig {
    pub fn new(topic: impl Into<String>, participants: Vec<Participant>) -> Self {
        Self {
            topic: topic.into(),
            participants,
            rounds: DEFAULT_ROUNDS,
            language: default_language(),
            chair: None,
            scenario: None,
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_chair(mut self, chair: impl Into<String>) -> Self {
        self.chair = Some(chair.into());
        self
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Number of active participants that take part in the turn rotation.
    pub fn active_speaker_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_speaker()).count()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::EmptyTopic);
        }

        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&self.rounds) {
            return Err(DomainError::RoundsOutOfRange {
                rounds: self.rounds,
                min: MIN_ROUNDS,
                max: MAX_ROUNDS,
            });
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            if participant.id.trim().is_empty() {
                return Err(DomainError::EmptyParticipantId);
            }
            if participant.id == DEFAULT_CHAIR_ID {
                return Err(DomainError::ReservedParticipantId(participant.id.clone()));
            }
            if !seen.insert(participant.id.as_str()) {
                return Err(DomainError::DuplicateParticipant(participant.id.clone()));
            }
        }

        let active = self.active_speaker_count();
        if active < MIN_ACTIVE_PARTICIPANTS {
            return Err(DomainError::NotEnoughParticipants {
                active,
                required: MIN_ACTIVE_PARTICIPANTS,
            });
        }

        Ok(())
    }
}

/// A live conference (Entity)
///
/// Tracks stage, round progress and the append-only transcript.
#[derive(Debug, Clone)]
pub struct Conference {
    id: String,
    topic: String,
    participants: Vec<Participant>,
    rounds_total: u32,
    language: String,
    chair: Option<String>,
    scenario: Option<Scenario>,
    stage: Stage,
    current_round: u32,
    transcript: Vec<Message>,
    start_time: DateTime<Utc>,
}

impl Conference {
    /// Create a conference from a validated configuration.
    ///
    /// Unknown scenario names are ignored; configuration loading reports them.
    pub fn new(id: impl Into<String>, config: ConferenceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let scenario = config.scenario.as_deref().and_then(Scenario::preset);

        Ok(Self {
            id: id.into(),
            topic: config.topic.trim().to_string(),
            participants: config.participants,
            rounds_total: config.rounds,
            language: config.language,
            chair: config.chair,
            scenario,
            stage: Stage::Waiting,
            current_round: 0,
            transcript: Vec::new(),
            start_time: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn rounds_total(&self) -> u32 {
        self.rounds_total
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn chair_id(&self) -> Option<&str> {
        self.chair.as_deref()
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Active participants in list order, excluding the moderator.
    pub fn speakers(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_speaker())
    }

    /// The moderator identity; a moderator entry in the participant list
    /// overrides the built-in one.
    pub fn moderator(&self) -> Participant {
        self.participants
            .iter()
            .find(|p| p.is_moderator())
            .cloned()
            .unwrap_or_else(Participant::moderator)
    }

    /// Resolve a speaker id to a participant or the moderator.
    pub fn speaker(&self, speaker_id: &str) -> Option<Participant> {
        if speaker_id == MODERATOR_ID {
            return Some(self.moderator());
        }
        self.participants
            .iter()
            .find(|p| p.id == speaker_id)
            .cloned()
    }

    /// Move to the next stage.
    pub fn transition_to(&mut self, next: Stage) -> Result<(), DomainError> {
        if !self.stage.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.stage,
                to: next,
            });
        }
        self.stage = next;
        Ok(())
    }

    /// The round that would run next, if the discussion has rounds left.
    pub fn next_round(&self) -> Option<u32> {
        (self.stage == Stage::Discussion && self.current_round < self.rounds_total)
            .then_some(self.current_round + 1)
    }

    /// Start `round`; it must directly follow the current round.
    pub fn begin_round(&mut self, round: u32) -> Result<(), DomainError> {
        if self.next_round() != Some(round) {
            return Err(DomainError::RoundOutOfSequence {
                current: self.current_round,
                requested: round,
                total: self.rounds_total,
            });
        }
        self.current_round = round;
        Ok(())
    }

    /// Append a message attributed to `speaker_id`.
    pub fn append_message(
        &mut self,
        speaker_id: &str,
        text: impl Into<String>,
    ) -> Result<&Message, DomainError> {
        let speaker = self
            .speaker(speaker_id)
            .ok_or_else(|| DomainError::UnknownSpeaker(speaker_id.to_string()))?;
        self.transcript.push(Message::new(&speaker, text));
        Ok(&self.transcript[self.transcript.len() - 1])
    }

    /// A slice of the transcript for paginated listing.
    pub fn messages_page(&self, limit: usize, offset: usize) -> MessagePage {
        let messages = self
            .transcript
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        MessagePage {
            total: self.transcript.len(),
            messages,
        }
    }

    pub fn snapshot(&self) -> ConferenceSnapshot {
        ConferenceSnapshot {
            id: self.id.clone(),
            topic: self.topic.clone(),
            participants: self.participants.clone(),
            rounds_total: self.rounds_total,
            language: self.language.clone(),
            chair: self.chair.clone(),
            scenario: self.scenario.as_ref().map(|s| s.name.clone()),
            stage: self.stage,
            current_round: self.current_round,
            transcript: self.transcript.clone(),
            start_time: self.start_time,
        }
    }
}

/// Point-in-time view of a conference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSnapshot {
    pub id: String,
    pub topic: String,
    pub participants: Vec<Participant>,
    pub rounds_total: u32,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub stage: Stage,
    pub current_round: u32,
    pub transcript: Vec<Message>,
    pub start_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Vec<Participant> {
        vec![
            Participant::new("gm", "Alex", "General manager"),
            Participant::new("cfo", "Dana", "Financial manager"),
            Participant::new("cto", "Sam", "R&D director"),
        ]
    }

    fn conference() -> Conference {
        Conference::new("c1", ConferenceConfig::new("Q3 roadmap", board()).with_rounds(2)).unwrap()
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let json = r#"{"topic":"Pricing","participants":[]}"#;
        let config: ConferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert!(config.chair.is_none());
    }

    #[test]
    fn test_validate_rejects_single_active_participant() {
        let participants = vec![
            Participant::new("gm", "Alex", "General manager"),
            Participant::new("cfo", "Dana", "Financial manager").inactive(),
            Participant::moderator(),
        ];
        let result = ConferenceConfig::new("Q3 roadmap", participants).validate();
        assert_eq!(
            result,
            Err(DomainError::NotEnoughParticipants {
                active: 1,
                required: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_topic() {
        let result = ConferenceConfig::new("   ", board()).validate();
        assert_eq!(result, Err(DomainError::EmptyTopic));
    }

    #[test]
    fn test_validate_rejects_rounds_out_of_range() {
        assert!(matches!(
            ConferenceConfig::new("t", board()).with_rounds(0).validate(),
            Err(DomainError::RoundsOutOfRange { rounds: 0, .. })
        ));
        assert!(matches!(
            ConferenceConfig::new("t", board()).with_rounds(21).validate(),
            Err(DomainError::RoundsOutOfRange { rounds: 21, .. })
        ));
        assert!(ConferenceConfig::new("t", board()).with_rounds(20).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut participants = board();
        participants.push(Participant::new("gm", "Other", "Duplicate"));
        let result = ConferenceConfig::new("t", participants).validate();
        assert_eq!(
            result,
            Err(DomainError::DuplicateParticipant("gm".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_reserved_id() {
        let mut participants = board();
        participants.push(Participant::default_chair());
        let result = ConferenceConfig::new("t", participants).validate();
        assert_eq!(
            result,
            Err(DomainError::ReservedParticipantId(DEFAULT_CHAIR_ID.to_string()))
        );
    }

    #[test]
    fn test_new_conference_starts_waiting() {
        let conf = conference();
        assert_eq!(conf.stage(), Stage::Waiting);
        assert_eq!(conf.current_round(), 0);
        assert!(conf.transcript().is_empty());
        assert_eq!(conf.next_round(), None);
    }

    #[test]
    fn test_unknown_scenario_is_ignored() {
        let conf = Conference::new(
            "c1",
            ConferenceConfig::new("t", board()).with_scenario("unknown"),
        )
        .unwrap();
        assert!(conf.scenario().is_none());

        let conf = Conference::new(
            "c2",
            ConferenceConfig::new("t", board()).with_scenario("brainstorming"),
        )
        .unwrap();
        assert_eq!(conf.scenario().unwrap().name, "brainstorming");
    }

    #[test]
    fn test_transition_rejects_skipping_introduction() {
        let mut conf = conference();
        let err = conf.transition_to(Stage::Discussion).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: Stage::Waiting,
                to: Stage::Discussion
            }
        );
        assert_eq!(conf.stage(), Stage::Waiting);
    }

    #[test]
    fn test_rounds_advance_only_during_discussion() {
        let mut conf = conference();
        assert!(conf.begin_round(1).is_err());

        conf.transition_to(Stage::Introduction).unwrap();
        conf.transition_to(Stage::Discussion).unwrap();
        assert_eq!(conf.next_round(), Some(1));

        // Rounds cannot be skipped or repeated
        assert!(conf.begin_round(2).is_err());
        conf.begin_round(1).unwrap();
        assert!(conf.begin_round(1).is_err());
        conf.begin_round(2).unwrap();

        // Bounded by rounds_total
        assert_eq!(conf.next_round(), None);
        assert!(conf.begin_round(3).is_err());

        conf.transition_to(Stage::Conclusion).unwrap();
        assert_eq!(conf.current_round(), 2);
    }

    #[test]
    fn test_append_message_resolves_speakers() {
        let mut conf = conference();
        let message = conf.append_message("cfo", "Numbers first.").unwrap();
        assert_eq!(message.speaker_name, "Dana");

        let message = conf.append_message(MODERATOR_ID, "Welcome.").unwrap();
        assert_eq!(message.speaker_id, MODERATOR_ID);
        assert_eq!(message.speaker_name, "Secretary");

        let err = conf.append_message("ghost", "Boo").unwrap_err();
        assert_eq!(err, DomainError::UnknownSpeaker("ghost".to_string()));
        assert_eq!(conf.transcript().len(), 2);
    }

    #[test]
    fn test_moderator_entry_overrides_builtin() {
        let mut participants = board();
        participants.push(Participant::new(MODERATOR_ID, "Pat", "Chief of Staff").inactive());
        let conf = Conference::new("c1", ConferenceConfig::new("t", participants)).unwrap();

        let moderator = conf.moderator();
        assert_eq!(moderator.name, "Pat");
        // The moderator never joins the rotation
        assert_eq!(conf.speakers().count(), 3);
    }

    #[test]
    fn test_messages_page() {
        let mut conf = conference();
        for i in 0..5 {
            conf.append_message("gm", format!("m{i}")).unwrap();
        }

        let page = conf.messages_page(2, 1);
        assert_eq!(page.total, 5);
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].text, "m1");
        assert_eq!(page.messages[1].text, "m2");

        let page = conf.messages_page(50, 10);
        assert_eq!(page.total, 5);
        assert!(page.messages.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let conf = conference();
        let value = serde_json::to_value(conf.snapshot()).unwrap();
        assert_eq!(value["stage"], "waiting");
        assert_eq!(value["currentRound"], 0);
        assert_eq!(value["roundsTotal"], 2);
        assert_eq!(value["topic"], "Q3 roadmap");
    }
}
