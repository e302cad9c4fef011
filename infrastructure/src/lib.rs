//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConferenceFile, ConfigError, ConfigIssue, ConfigLoader, FileConferenceConfig, FileConfig,
    FileGenerationConfig, FileObserversConfig, FileOutputConfig, FilePacingConfig, Severity,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::{OfflineGenerator, OpenAiGenerator, ProviderKind, SelectedGenerator};
