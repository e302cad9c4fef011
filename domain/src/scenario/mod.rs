//! Discussion scenarios
//!
//! A scenario reshapes a conference without changing its flow: it replaces
//! the per-round topic structure and adds framing and guidance to the
//! discussion prompts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A discussion scenario preset (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    /// Framing added to every discussion prompt
    pub system_prompt: String,
    /// Round index to round focus
    pub round_structure: BTreeMap<u32, String>,
    /// Extra guidance appended to participant remarks
    pub discussion_guidance: String,
}

impl Scenario {
    /// Names of all built-in presets.
    pub const PRESETS: &'static [&'static str] = &["brainstorming"];

    /// Look up a built-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "brainstorming" => Some(Self::brainstorming()),
            _ => None,
        }
    }

    /// Open ideation: generate, extend, combine, then evaluate ideas.
    pub fn brainstorming() -> Self {
        let round_structure = BTreeMap::from([
            (
                1,
                "Free ideation: put forward any ideas and possibilities without limits".to_string(),
            ),
            (
                2,
                "Extension: build on the ideas already raised and push them further".to_string(),
            ),
            (
                3,
                "Combination: merge different ideas into more complete proposals".to_string(),
            ),
            (
                4,
                "Evaluation: assess the ideas and shortlist the most promising directions"
                    .to_string(),
            ),
        ]);

        Self {
            name: "brainstorming".to_string(),
            description: "Encourages creative thinking and a wide range of ideas, exploring \
                          possibilities without constraints"
                .to_string(),
            system_prompt: "This is a brainstorming session. Use your imagination freely and do \
                            not worry about whether an idea is practical yet. Every idea has \
                            value: build on what others say and avoid criticising ideas too \
                            early."
                .to_string(),
            round_structure,
            discussion_guidance: "There are no bad ideas here. Express yourself freely and, \
                                  rather than judging others' ideas, try to develop them further."
                .to_string(),
        }
    }

    /// Focus phrase for a round, if the scenario defines one.
    pub fn round_focus(&self, round: u32) -> Option<&str> {
        self.round_structure.get(&round).map(String::as_str)
    }
}
