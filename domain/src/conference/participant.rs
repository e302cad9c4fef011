//! Participant value object

use serde::{Deserialize, Serialize};

/// Identity of the always-present moderator.
pub const MODERATOR_ID: &str = "moderator";

/// Identity of the placeholder chair used when nobody else can chair.
pub const DEFAULT_CHAIR_ID: &str = "default_chair";

/// Generation temperature used when a participant does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

fn default_active() -> bool {
    true
}

/// A conference participant (Value Object)
///
/// Immutable once the conference is created. `personality` and `expertise`
/// only influence prompt construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub expertise: String,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            personality: String::new(),
            expertise: String::new(),
            is_active: true,
            temperature: None,
        }
    }

    /// The built-in moderator identity.
    pub fn moderator() -> Self {
        Self::new(MODERATOR_ID, "Secretary", "Meeting Secretary")
            .with_personality("Organised, neutral and precise")
            .with_expertise("Minute taking and summarising discussions")
    }

    /// Placeholder chair for a conference without an eligible participant.
    pub fn default_chair() -> Self {
        Self::new(DEFAULT_CHAIR_ID, "Default Chair", "Meeting Facilitator")
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = expertise.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn is_moderator(&self) -> bool {
        self.id == MODERATOR_ID
    }

    /// Active and not the moderator, i.e. part of the normal turn rotation.
    pub fn is_speaker(&self) -> bool {
        self.is_active && !self.is_moderator()
    }

    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}
