//! Configuration file loading for roundtable
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ROUNDTABLE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./roundtable.toml` or `./.roundtable.toml`
//! 4. Global: `$XDG_CONFIG_HOME/roundtable/config.toml`
//! 5. Default values

mod conference_file;
mod error;
mod file_config;
mod loader;
mod validation;

pub use conference_file::ConferenceFile;
pub use error::ConfigError;
pub use file_config::{
    FileConferenceConfig, FileConfig, FileGenerationConfig, FileObserversConfig,
    FileOutputConfig, FilePacingConfig,
};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, Severity};
