//! Deterministic generator that never leaves the process

use async_trait::async_trait;
use roundtable_application::{
    GenerationError, GenerationRequest, ResponseGenerator, UtteranceKind,
};

/// Produces placeholder utterances naming the speaker.
///
/// Used for dry runs and whenever no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl ResponseGenerator for OfflineGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let speaker = &request.speaker;
        let text = match request.kind {
            UtteranceKind::Introduction => format!(
                "Hello everyone, I'm {}, {}. I look forward to this discussion.",
                speaker.name, speaker.title
            ),
            UtteranceKind::Remark => format!(
                "As {}, I'd like to add my perspective to the current point.",
                speaker.title
            ),
            UtteranceKind::Summary => {
                "Thank you all. We covered the topic from several angles; the main points \
                 and follow-up actions are recorded in the transcript."
                    .to_string()
            }
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::Participant;

    #[tokio::test]
    async fn test_utterance_names_speaker() {
        let speaker = Participant::new("cfo", "Bob", "CFO");
        let request = GenerationRequest::new(UtteranceKind::Introduction, &speaker, "sys", "intro");

        let text = OfflineGenerator.generate(&request).await.unwrap();
        assert!(text.contains("Bob"));
        assert!(text.contains("CFO"));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let speaker = Participant::new("cto", "Dan", "CTO");
        let request = GenerationRequest::new(UtteranceKind::Remark, &speaker, "sys", "go");

        let first = OfflineGenerator.generate(&request).await.unwrap();
        let second = OfflineGenerator.generate(&request).await.unwrap();
        assert_eq!(first, second);
    }
}
