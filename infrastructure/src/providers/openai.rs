//! OpenAI-compatible chat completions adapter

use crate::config::FileGenerationConfig;
use async_trait::async_trait;
use roundtable_application::{
    GenerationError, GenerationRequest, ResponseGenerator, UtteranceKind,
};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    summary_max_tokens: u32,
    timeout: Duration,
}

impl OpenAiGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let defaults = FileGenerationConfig::default();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            max_tokens: defaults.max_tokens,
            summary_max_tokens: defaults.summary_max_tokens,
            timeout: Duration::from_secs(defaults.timeout_secs),
        }
    }

    pub fn from_config(config: &FileGenerationConfig, api_key: String) -> Self {
        Self::new(&config.base_url, &config.model, api_key)
            .with_max_tokens(config.max_tokens, config.summary_max_tokens)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_max_tokens(mut self, remark: u32, summary: u32) -> Self {
        self.max_tokens = remark;
        self.summary_max_tokens = summary;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn payload(&self, request: &GenerationRequest) -> Value {
        let max_tokens = match request.kind {
            UtteranceKind::Summary => self.summary_max_tokens,
            UtteranceKind::Introduction | UtteranceKind::Remark => self.max_tokens,
        };

        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": max_tokens,
        })
    }

    async fn send(&self, payload: &Value) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => GenerationError::NotConfigured(format!("authentication failed: {}", text)),
                429 => GenerationError::RequestFailed("rate limit exceeded".to_string()),
                code => GenerationError::RequestFailed(format!("HTTP {}: {}", code, text)),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        extract_content(&data)
    }
}

/// Pull `choices[0].message.content` out of a completion body.
fn extract_content(data: &Value) -> Result<String, GenerationError> {
    let message = data
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| GenerationError::InvalidResponse("No choices in response".to_string()))?;

    match message.get("content").and_then(|c| c.as_str()) {
        Some(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
        _ => Err(GenerationError::InvalidResponse("Empty content".to_string())),
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!(
            speaker = %request.speaker.id,
            model = %self.model,
            kind = ?request.kind,
            "Requesting completion"
        );
        let payload = self.payload(request);
        tokio::time::timeout(self.timeout, self.send(&payload))
            .await
            .map_err(|_| GenerationError::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::Participant;

    fn generator() -> OpenAiGenerator {
        OpenAiGenerator::new("http://localhost:9/v1/", "gpt-4o-mini", "sk-test")
            .with_max_tokens(500, 800)
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            generator().endpoint(),
            "http://localhost:9/v1/chat/completions"
        );
    }

    #[test]
    fn test_payload_budgets_by_kind() {
        let speaker = Participant::new("cfo", "Bob", "CFO").with_temperature(0.4);
        let remark = GenerationRequest::new(UtteranceKind::Remark, &speaker, "persona", "speak");
        let payload = generator().payload(&remark);

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["max_tokens"], 500);
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][0]["content"], "persona");
        assert_eq!(payload["messages"][1]["content"], "speak");
        assert!((payload["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);

        let summary = GenerationRequest::new(UtteranceKind::Summary, &speaker, "s", "p")
            .with_temperature(0.5);
        assert_eq!(generator().payload(&summary)["max_tokens"], 800);
    }

    #[test]
    fn test_extract_content() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Agreed.\n" } }]
        });
        assert_eq!(extract_content(&body).unwrap(), "Agreed.");
    }

    #[test]
    fn test_extract_content_rejects_empty() {
        assert!(matches!(
            extract_content(&json!({ "choices": [] })),
            Err(GenerationError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_content(&json!({ "choices": [{ "message": { "content": "" } }] })),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        let generator = generator().with_timeout(Duration::from_secs(5));
        let speaker = Participant::new("gm", "Alice", "GM");
        let request = GenerationRequest::new(UtteranceKind::Remark, &speaker, "s", "p");

        let err = generator.generate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::RequestFailed(_) | GenerationError::Timeout
        ));
    }
}
