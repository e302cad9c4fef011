//! Application error types

use roundtable_domain::{DomainError, Stage};
use thiserror::Error;

/// Errors surfaced by conference lifecycle operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConferenceError {
    #[error("Conference not found: {0}")]
    NotFound(String),

    #[error("Invalid conference configuration: {0}")]
    Validation(DomainError),

    /// A state change the orchestrator relied on was rejected
    #[error("Conference {conference_id} failed during {stage}: {reason}")]
    Internal {
        conference_id: String,
        stage: Stage,
        reason: String,
    },
}

impl ConferenceError {
    pub fn internal(conference_id: impl Into<String>, stage: Stage, reason: impl ToString) -> Self {
        ConferenceError::Internal {
            conference_id: conference_id.into(),
            stage,
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConferenceError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_display_names_conference_and_stage() {
        let err = ConferenceError::internal(
            "c1",
            Stage::Discussion,
            DomainError::UnknownSpeaker("ghost".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Conference c1 failed during discussion: Unknown speaker: ghost"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = ConferenceError::Validation(DomainError::EmptyTopic);
        assert_eq!(
            err.to_string(),
            "Invalid conference configuration: Conference topic cannot be empty"
        );
        assert!(!err.is_not_found());
        assert!(ConferenceError::NotFound("x".to_string()).is_not_found());
    }
}
