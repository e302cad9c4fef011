//! Per-round discussion focus

use crate::scenario::Scenario;

/// Sub-topic for `round` of a conference on `topic`.
///
/// A scenario's round structure wins over the default table; rounds with
/// no entry in either fall back to a generic phrase.
pub fn round_topic(round: u32, topic: &str, scenario: Option<&Scenario>) -> String {
    if let Some(focus) = scenario.and_then(|s| s.round_focus(round)) {
        return format!("{}: {}", topic, focus);
    }

    match round {
        1 => format!("The current state and key challenges of {}", topic),
        2 => format!("Opportunities and possible approaches for {}", topic),
        3 => format!("Risks and trade-offs of the proposed approaches to {}", topic),
        4 => format!("A concrete action plan for {}", topic),
        5 => format!("Resources, owners and success metrics for {}", topic),
        _ => format!("Further discussion points on {}", topic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        assert_eq!(
            round_topic(1, "Q3 roadmap", None),
            "The current state and key challenges of Q3 roadmap"
        );
        assert!(round_topic(5, "Q3 roadmap", None).contains("success metrics"));
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(
            round_topic(9, "Q3 roadmap", None),
            "Further discussion points on Q3 roadmap"
        );
    }

    #[test]
    fn test_scenario_overrides_table() {
        let scenario = Scenario::brainstorming();
        let topic = round_topic(2, "New products", Some(&scenario));
        assert!(topic.starts_with("New products: Extension"));
        // Past the scenario's structure the default table applies again
        assert!(round_topic(5, "New products", Some(&scenario)).contains("success metrics"));
    }
}
