//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How live conference events are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted transcript
    #[default]
    Text,
    /// One JSON event per line
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Run a simulated meeting between AI participants")]
#[command(long_about = r#"
Roundtable runs a meeting between AI participants and streams it live.

A conference moves through four stages:
1. Introduction: the moderator welcomes everyone, each participant introduces themselves
2. Discussion: numbered rounds; the chair opens each one, then every participant speaks
3. Conclusion: the moderator summarises and closes the meeting
4. Ended

While it runs, type commands on stdin:
  next      start the next round (manual progression)
  end       conclude the meeting now
  {"type":"next_round"} / {"type":"end_conference"} are accepted as well

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_SECTION__KEY                   Environment variables
2. --config <path>                           Explicit config file
3. ./roundtable.toml                         Project-level config
4. ~/.config/roundtable/config.toml          Global config

Example:
  roundtable board-meeting.toml
  roundtable --manual --rounds 2 board-meeting.toml
  roundtable --offline --output json board-meeting.toml
"#)]
pub struct Cli {
    /// Conference definition file (topic and participants)
    #[arg(value_name = "CONFERENCE", required_unless_present = "show_config")]
    pub conference: Option<PathBuf>,

    /// Override the number of discussion rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Advance rounds only on the `next` command
    #[arg(long)]
    pub manual: bool,

    /// Use the offline generator instead of a remote model
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write every event to a JSONL transcript file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
