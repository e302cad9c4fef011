//! Response generator port
//!
//! Defines the interface for producing a participant's utterance from a prompt.

use async_trait::async_trait;
use roundtable_domain::Participant;
use thiserror::Error;

/// Errors that can occur while generating an utterance
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generator not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// What an utterance is for; adapters may budget tokens differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceKind {
    Introduction,
    Remark,
    Summary,
}

/// A single generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Persona / role instructions
    pub system: String,
    /// The turn prompt
    pub prompt: String,
    pub speaker: Participant,
    pub temperature: f32,
    pub kind: UtteranceKind,
}

impl GenerationRequest {
    pub fn new(
        kind: UtteranceKind,
        speaker: &Participant,
        system: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            speaker: speaker.clone(),
            temperature: speaker.temperature_or_default(),
            kind,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Capability to turn a prompt into a speaker's utterance
///
/// Calls are assumed slow and fallible. The orchestrator recovers every
/// failure locally, so implementations should report errors rather than
/// invent text.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
