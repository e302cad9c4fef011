//! Prompt domain
//!
//! Templates for every utterance a conference produces, generated or fixed.

mod template;

pub use template::{PromptTemplate, RESPONSE_INSTRUCTION};
