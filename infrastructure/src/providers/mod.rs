//! Response generator adapters
//!
//! [`SelectedGenerator`] picks a backend from the `[generation]` config
//! section and hands every request to it.

pub mod offline;
pub mod openai;

pub use offline::OfflineGenerator;
pub use openai::OpenAiGenerator;

use crate::config::FileGenerationConfig;
use async_trait::async_trait;
use roundtable_application::{GenerationError, GenerationRequest, ResponseGenerator};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Offline,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Offline => "offline",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "offline" => Ok(ProviderKind::Offline),
            other => Err(format!(
                "unknown provider '{}' (expected openai or offline)",
                other
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The generator chosen at startup
pub enum SelectedGenerator {
    OpenAi(OpenAiGenerator),
    Offline(OfflineGenerator),
}

impl SelectedGenerator {
    /// Build the configured generator.
    ///
    /// An OpenAI provider without an API key degrades to the offline
    /// generator so the conference can still run end to end.
    pub fn from_config(config: &FileGenerationConfig) -> Self {
        match config.parse_provider().0 {
            ProviderKind::Offline => Self::Offline(OfflineGenerator),
            ProviderKind::OpenAi => match config.resolve_api_key() {
                Some(api_key) => Self::OpenAi(OpenAiGenerator::from_config(config, api_key)),
                None => {
                    warn!(
                        api_key_env = %config.api_key_env,
                        "No API key found, using the offline generator"
                    );
                    Self::Offline(OfflineGenerator)
                }
            },
        }
    }

    pub fn offline() -> Self {
        Self::Offline(OfflineGenerator)
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            SelectedGenerator::OpenAi(_) => ProviderKind::OpenAi,
            SelectedGenerator::Offline(_) => ProviderKind::Offline,
        }
    }
}

#[async_trait]
impl ResponseGenerator for SelectedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        match self {
            SelectedGenerator::OpenAi(generator) => generator.generate(request).await,
            SelectedGenerator::Offline(generator) => generator.generate(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!(" offline ".parse::<ProviderKind>(), Ok(ProviderKind::Offline));
        assert!("anthropic".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_offline_provider_selected() {
        let config = FileGenerationConfig {
            provider: "offline".to_string(),
            ..Default::default()
        };
        assert_eq!(
            SelectedGenerator::from_config(&config).kind(),
            ProviderKind::Offline
        );
    }

    #[test]
    fn test_openai_without_key_degrades_to_offline() {
        let config = FileGenerationConfig {
            api_key_env: "ROUNDTABLE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(
            SelectedGenerator::from_config(&config).kind(),
            ProviderKind::Offline
        );
    }

    #[test]
    fn test_openai_with_inline_key() {
        let config = FileGenerationConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(
            SelectedGenerator::from_config(&config).kind(),
            ProviderKind::OpenAi
        );
    }
}
