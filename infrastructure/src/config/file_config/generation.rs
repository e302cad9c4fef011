//! Text generation configuration from TOML (`[generation]` section)

use super::{ConfigIssue, Severity};
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Raw generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// "openai" or "offline"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub summary_max_tokens: u32,
    pub summary_temperature: f32,
    pub timeout_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi.as_str().to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            max_tokens: 500,
            summary_max_tokens: 800,
            summary_temperature: 0.5,
            timeout_secs: 60,
        }
    }
}

impl FileGenerationConfig {
    pub fn parse_provider(&self) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.provider.parse::<ProviderKind>() {
            Ok(kind) => (kind, vec![]),
            Err(e) => (
                ProviderKind::Offline,
                vec![ConfigIssue::new(
                    Severity::Warning,
                    "generation.provider",
                    format!("{}, falling back to 'offline'", e),
                )],
            ),
        }
    }

    /// API key from the inline setting or the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_provider().1;

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "generation.model",
                "model name cannot be empty",
            ));
        }
        if !(0.0..=2.0).contains(&self.summary_temperature) {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "generation.summary_temperature",
                format!(
                    "summary_temperature {} is outside 0.0-2.0",
                    self.summary_temperature
                ),
            ));
        }
        if self.max_tokens == 0 || self.summary_max_tokens == 0 {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "generation.max_tokens",
                "token budgets must be positive",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileGenerationConfig::default();
        assert_eq!(config.parse_provider().0, ProviderKind::OpenAi);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.summary_max_tokens, 800);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_inline_api_key_wins() {
        let config = FileGenerationConfig {
            api_key: Some("sk-inline".to_string()),
            api_key_env: "ROUNDTABLE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("sk-inline".to_string()));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileGenerationConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "ROUNDTABLE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_unknown_provider_falls_back_offline() {
        let config = FileGenerationConfig {
            provider: "bard".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_provider();
        assert_eq!(kind, ProviderKind::Offline);
        assert_eq!(issues[0].field, "generation.provider");
    }
}
