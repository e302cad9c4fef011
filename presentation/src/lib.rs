//! Presentation layer for roundtable
//!
//! This crate contains CLI definitions, output formatters and the
//! terminal observer that renders a conference live.

pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use output::observer::ConsoleObserver;
