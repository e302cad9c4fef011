//! JSON lines output for conference events

use crate::output::formatter::OutputFormatter;
use roundtable_domain::ConferenceEvent;

/// Emits each event as one compact JSON object
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_event(&self, event: &ConferenceEvent) -> Option<String> {
        serde_json::to_string(event).ok().map(|line| line + "\n")
    }
}
