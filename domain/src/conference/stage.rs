//! Conference stage state machine

use serde::{Deserialize, Serialize};

/// Stage of a conference
///
/// Stages only move forward: `waiting < introduction < discussion <
/// conclusion < ended`. Discussion is the only stage that may be skipped,
/// when the conference is ended before any round runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Waiting,
    Introduction,
    Discussion,
    Conclusion,
    Ended,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Waiting => "waiting",
            Stage::Introduction => "introduction",
            Stage::Discussion => "discussion",
            Stage::Conclusion => "conclusion",
            Stage::Ended => "ended",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Waiting => "Waiting",
            Stage::Introduction => "Introductions",
            Stage::Discussion => "Discussion",
            Stage::Conclusion => "Conclusion",
            Stage::Ended => "Ended",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Ended)
    }

    /// Whether `next` is a legal successor of this stage.
    pub fn can_transition_to(&self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Waiting, Stage::Introduction)
                | (Stage::Introduction, Stage::Discussion)
                | (Stage::Introduction, Stage::Conclusion)
                | (Stage::Discussion, Stage::Conclusion)
                | (Stage::Conclusion, Stage::Ended)
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
