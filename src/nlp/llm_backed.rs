//! NER and summarization through a chat-completion model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::NlpError;
use crate::llm::{CompletionRequest, LlmProvider};
use crate::nlp::{Entity, EntityLabel, EntityRecognizer, SummaryBounds, Summarizer};

const BACKEND: &str = "llm";

const SUMMARY_PROMPT: &str = "You summarize Reddit activity for a user profile. \
Reply with the summary only: plain prose, no preamble, no lists, no quotes.";

const NER_PROMPT: &str = "Extract named entities from the user's text. \
Reply with a JSON array only, each element {\"text\": <span>, \"label\": \"PERSON\" | \"GPE\"}. \
GPE means a country, state or city. Reply [] when there are none.";

/// Summarizer that asks the model for a bounded abstractive summary.
pub struct LlmSummarizer {
    llm: Arc<dyn LlmProvider>,
}

impl LlmSummarizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, NlpError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = CompletionRequest::prompt(
            SUMMARY_PROMPT,
            format!(
                "Summarize in {} to {} words:\n\n{}",
                bounds.min, bounds.max, text
            ),
        )
        .with_max_tokens(bounds.max.saturating_mul(2).max(16))
        .with_temperature(0.0);

        let response = self.llm.complete(request).await?;
        let summary = response.content.trim().trim_matches('"').trim().to_string();
        if summary.is_empty() {
            return Err(NlpError::InvalidOutput {
                backend: BACKEND.to_string(),
                reason: "empty summary".to_string(),
            });
        }
        tracing::debug!(
            model = self.llm.model_name(),
            tokens = response.output_tokens,
            "LLM summary produced"
        );
        Ok(summary)
    }
}

/// Entity recognizer that asks the model for a JSON entity list.
pub struct LlmEntityRecognizer {
    llm: Arc<dyn LlmProvider>,
}

impl LlmEntityRecognizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    text: String,
    label: String,
}

/// Pull the entity array out of a reply that may be wrapped in prose or fences.
fn parse_entities(reply: &str) -> Result<Vec<Entity>, NlpError> {
    let invalid = |reason: String| NlpError::InvalidOutput {
        backend: BACKEND.to_string(),
        reason,
    };

    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(invalid("no JSON array in reply".to_string()));
    };
    if end < start {
        return Err(invalid("no JSON array in reply".to_string()));
    }

    let wire: Vec<WireEntity> =
        serde_json::from_str(&reply[start..=end]).map_err(|e| invalid(e.to_string()))?;

    Ok(wire
        .into_iter()
        .filter(|e| !e.text.trim().is_empty())
        .map(|e| Entity {
            text: e.text.trim().to_string(),
            label: match e.label.trim().to_ascii_uppercase().as_str() {
                "PERSON" | "PER" => EntityLabel::Person,
                "GPE" | "LOC" | "LOCATION" => EntityLabel::Gpe,
                _ => EntityLabel::Other,
            },
        })
        .collect())
}

#[async_trait]
impl EntityRecognizer for LlmEntityRecognizer {
    fn name(&self) -> &str {
        BACKEND
    }

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NlpError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let request = CompletionRequest::prompt(NER_PROMPT, text)
            .with_max_tokens(512)
            .with_temperature(0.0);

        let response = self.llm.complete(request).await?;
        parse_entities(&response.content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionResponse, FinishReason};

    /// Replies with a canned string and records the prompts it saw.
    struct CannedLlm {
        reply: String,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedLlm {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for CannedLlm {
        fn model_name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            Ok(CompletionResponse {
                content: self.reply.clone(),
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Stop,
            })
        }
    }

    const BOUNDS: SummaryBounds = SummaryBounds { min: 10, max: 50 };

    #[tokio::test]
    async fn summary_is_trimmed_and_bounded_in_prompt() {
        let llm = CannedLlm::new("  \"Enjoys AR and AI.\"  ");
        let summarizer = LlmSummarizer::new(llm.clone());

        let summary = summarizer.summarize("AI and VR tech", BOUNDS).await.unwrap();
        assert_eq!(summary, "Enjoys AR and AI.");

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, Some(100));
        assert!(seen[0].messages[1].content.contains("10 to 50 words"));
    }

    #[tokio::test]
    async fn empty_summary_is_an_error() {
        let summarizer = LlmSummarizer::new(CannedLlm::new("   "));
        let result = summarizer.summarize("AI and VR tech", BOUNDS).await;
        assert!(matches!(result, Err(NlpError::InvalidOutput { .. })));
    }

    #[tokio::test]
    async fn empty_input_skips_the_model() {
        let llm = CannedLlm::new("unused");
        let summarizer = LlmSummarizer::new(llm.clone());
        assert_eq!(summarizer.summarize("  ", BOUNDS).await.unwrap(), "");
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn recognizer_parses_fenced_json() {
        let reply = "```json\n[{\"text\":\"Sam\",\"label\":\"PERSON\"},{\"text\":\"London\",\"label\":\"gpe\"},{\"text\":\"Apple\",\"label\":\"ORG\"}]\n```";
        let recognizer = LlmEntityRecognizer::new(CannedLlm::new(reply));
        let entities = recognizer.recognize("Sam moved to London").await.unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::person("Sam"),
                Entity::place("London"),
                Entity {
                    text: "Apple".into(),
                    label: EntityLabel::Other
                },
            ]
        );
    }

    #[test]
    fn reply_without_array_is_invalid() {
        assert!(matches!(
            parse_entities("no entities here"),
            Err(NlpError::InvalidOutput { .. })
        ));
        assert_eq!(parse_entities("[]").unwrap(), Vec::new());
    }
}
