//! Presentation-level configuration
//!
//! Configuration for how events are rendered on the terminal.

use crate::cli::commands::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print events as JSON lines
    pub json: bool,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// The CLI flag wins over the configured default.
    pub fn format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.unwrap_or(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        })
    }

    /// Apply the color preference process-wide.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
