//! Output formatter trait

use roundtable_domain::ConferenceEvent;

/// Trait for rendering conference events
pub trait OutputFormatter: Send + Sync {
    /// Render one event. `None` means the event is not shown.
    fn format_event(&self, event: &ConferenceEvent) -> Option<String>;
}
