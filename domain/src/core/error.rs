//! Domain error types

use crate::conference::stage::Stage;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Conference topic cannot be empty")]
    EmptyTopic,

    #[error("At least {required} active participants are required, got {active}")]
    NotEnoughParticipants { active: usize, required: usize },

    #[error("Rounds must be between {min} and {max}, got {rounds}")]
    RoundsOutOfRange { rounds: u32, min: u32, max: u32 },

    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(String),

    #[error("Participant id cannot be empty")]
    EmptyParticipantId,

    #[error("Participant id is reserved: {0}")]
    ReservedParticipantId(String),

    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidTransition { from: Stage, to: Stage },

    #[error("Round {requested} cannot start (current round {current} of {total})")]
    RoundOutOfSequence {
        current: u32,
        requested: u32,
        total: u32,
    },

    #[error("Unknown speaker: {0}")]
    UnknownSpeaker(String),
}

impl DomainError {
    /// Whether this error rejects a conference configuration.
    ///
    /// Validation errors surface at creation time; everything else is a
    /// fault in a running conference.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyTopic
                | DomainError::NotEnoughParticipants { .. }
                | DomainError::RoundsOutOfRange { .. }
                | DomainError::DuplicateParticipant(_)
                | DomainError::EmptyParticipantId
                | DomainError::ReservedParticipantId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_enough_participants_display() {
        let error = DomainError::NotEnoughParticipants {
            active: 1,
            required: 2,
        };
        assert_eq!(
            error.to_string(),
            "At least 2 active participants are required, got 1"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: Stage::Ended,
            to: Stage::Discussion,
        };
        assert_eq!(
            error.to_string(),
            "Invalid stage transition: ended -> discussion"
        );
    }

    #[test]
    fn test_is_validation_check() {
        assert!(DomainError::EmptyTopic.is_validation());
        assert!(DomainError::DuplicateParticipant("cfo".to_string()).is_validation());
        assert!(
            !DomainError::InvalidTransition {
                from: Stage::Waiting,
                to: Stage::Ended
            }
            .is_validation()
        );
        assert!(!DomainError::UnknownSpeaker("ghost".to_string()).is_validation());
    }
}
