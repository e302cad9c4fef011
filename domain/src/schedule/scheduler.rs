//! Turn scheduling policy
//!
//! Decides who chairs a round, the speaking order and how much of the
//! transcript each speaker sees. Everything here is a pure function of the
//! conference state so the same input always yields the same plan.

use super::round_topic::round_topic;
use crate::conference::{Conference, Message, Participant};
use crate::core::string::trailing;

/// Messages shown to the chair when opening rounds after the first.
pub const CHAIR_CONTEXT_WINDOW: usize = 10;
/// Messages shown to every other speaker.
pub const SPEAKER_CONTEXT_WINDOW: usize = 5;
/// Messages the moderator summarises at the conclusion.
pub const SUMMARY_CONTEXT_WINDOW: usize = 30;

/// How much prior transcript a turn is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextWindow {
    /// No context (chair opening the first round)
    Empty,
    /// Chair opening a later round
    Opening,
    /// Regular speaker responding to recent remarks
    Response,
}

impl ContextWindow {
    pub fn size(&self) -> usize {
        match self {
            ContextWindow::Empty => 0,
            ContextWindow::Opening => CHAIR_CONTEXT_WINDOW,
            ContextWindow::Response => SPEAKER_CONTEXT_WINDOW,
        }
    }

    /// Render the trailing window of `transcript` as newline-joined texts.
    ///
    /// Called when the turn is taken, so a response window includes
    /// remarks made earlier in the same round.
    pub fn render(&self, transcript: &[Message]) -> String {
        trailing(transcript, self.size())
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single speaking slot in a round
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: Participant,
    pub context: ContextWindow,
}

impl Turn {
    pub fn is_opening(&self) -> bool {
        !matches!(self.context, ContextWindow::Response)
    }
}

/// Ordered speaking plan for one discussion round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundPlan {
    pub round: u32,
    pub round_topic: String,
    pub chair: Participant,
    /// Chair first, then every other active speaker in list order
    pub turns: Vec<Turn>,
}

pub struct TurnScheduler;

impl TurnScheduler {
    /// Chair for discussion rounds.
    ///
    /// The configured chair if it names an active non-moderator
    /// participant, else the first active speaker, else a placeholder.
    pub fn resolve_chair(conference: &Conference) -> Participant {
        Self::configured_chair(conference)
            .or_else(|| conference.speakers().next())
            .cloned()
            .unwrap_or_else(Participant::default_chair)
    }

    /// Chair for the conclusion, if any participant can take the role.
    ///
    /// Unlike [`Self::resolve_chair`] this never invents a placeholder; the
    /// moderator runs the conclusion alone when it returns `None`.
    pub fn closing_chair(conference: &Conference) -> Option<Participant> {
        Self::configured_chair(conference)
            .or_else(|| conference.speakers().next())
            .cloned()
    }

    fn configured_chair(conference: &Conference) -> Option<&Participant> {
        let chair_id = conference.chair_id()?;
        conference
            .speakers()
            .find(|p| p.id == chair_id)
    }

    pub fn plan_round(conference: &Conference, round: u32) -> RoundPlan {
        let chair = Self::resolve_chair(conference);

        let opening = Turn {
            speaker: chair.clone(),
            context: if round <= 1 {
                ContextWindow::Empty
            } else {
                ContextWindow::Opening
            },
        };

        let turns = std::iter::once(opening)
            .chain(
                conference
                    .speakers()
                    .filter(|p| p.id != chair.id)
                    .map(|p| Turn {
                        speaker: p.clone(),
                        context: ContextWindow::Response,
                    }),
            )
            .collect();

        RoundPlan {
            round,
            round_topic: round_topic(round, conference.topic(), conference.scenario()),
            chair,
            turns,
        }
    }

    /// Attributed trailing transcript handed to the moderator for the summary.
    pub fn summary_context(transcript: &[Message]) -> String {
        trailing(transcript, SUMMARY_CONTEXT_WINDOW)
            .iter()
            .map(Message::attributed)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
