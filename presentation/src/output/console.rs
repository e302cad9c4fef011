//! Console output formatter for conference events

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use roundtable_domain::{ConferenceEvent, Message, Stage};

/// Formats conference events as a readable transcript
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one event
    pub fn format_event(event: &ConferenceEvent) -> String {
        match event {
            ConferenceEvent::ConnectionInitialized {
                stage,
                current_round,
                messages,
            } => {
                let mut output = Self::header(&format!(
                    "Conference: {} (round {})",
                    stage.display_name(),
                    current_round
                ));
                output.push('\n');
                for message in messages {
                    output.push_str(&Self::format_message(message));
                }
                output
            }
            ConferenceEvent::StageChanged { stage } => Self::stage_header(*stage),
            ConferenceEvent::RoundStarted { round } => {
                format!("\n{}\n", format!("── Round {} ──", round).cyan().bold())
            }
            ConferenceEvent::MessageAppended { message, .. } => Self::format_message(message),
            ConferenceEvent::RoundCompleted { round } => {
                format!("{}\n", format!("Round {} complete", round).dimmed())
            }
            ConferenceEvent::Error { message } => {
                format!("{} {}\n", "Error:".red().bold(), message)
            }
        }
    }

    /// Format a transcript message
    pub fn format_message(message: &Message) -> String {
        format!(
            "\n{} {}\n{}\n",
            format!("{} ({})", message.speaker_name, message.speaker_title)
                .yellow()
                .bold(),
            message.timestamp.format("%H:%M:%S").to_string().dimmed(),
            Self::indent(&message.text, "  ")
        )
    }

    fn stage_header(stage: Stage) -> String {
        if stage == Stage::Ended {
            return Self::footer();
        }
        format!(
            "\n{}\n{}\n",
            stage.display_name().cyan().bold(),
            "-".repeat(40)
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!(
            "\n{}\n{:^60}\n{}\n",
            "=".repeat(60).cyan(),
            "Meeting adjourned".bold(),
            "=".repeat(60).cyan()
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_event(&self, event: &ConferenceEvent) -> Option<String> {
        Some(Self::format_event(event))
    }
}
