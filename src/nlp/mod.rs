//! Pluggable language capabilities: named-entity recognition and summarization.
//!
//! Each capability has a deterministic local backend and an LLM-backed one.
//! The pipeline only sees the traits.

mod gazetteer;
mod lead;
mod llm_backed;

pub use gazetteer::GazetteerRecognizer;
pub use lead::LeadSummarizer;
pub use llm_backed::{LlmEntityRecognizer, LlmSummarizer};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{NerBackend, NlpConfig, SummarizerBackend};
use crate::error::NlpError;
use crate::llm::LlmProvider;

/// Entity type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    /// Geo-political entity: a country, state or city.
    Gpe,
    Other,
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn person(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: EntityLabel::Person,
        }
    }

    pub fn place(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: EntityLabel::Gpe,
        }
    }
}

/// Finds PERSON and GPE spans in free text.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NlpError>;
}

/// Length bounds for a summary, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub min: u32,
    pub max: u32,
}

/// Produces a short summary of bounded input text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Must tolerate short or empty input.
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, NlpError>;
}

/// Build the configured recognizer. `llm` is required for [`NerBackend::Llm`].
pub fn create_recognizer(
    config: &NlpConfig,
    llm: Option<Arc<dyn LlmProvider>>,
) -> Result<Arc<dyn EntityRecognizer>, NlpError> {
    match config.ner_backend {
        NerBackend::Gazetteer => Ok(Arc::new(GazetteerRecognizer::new())),
        NerBackend::Llm => {
            let provider = llm.ok_or_else(|| NlpError::Unavailable {
                backend: "llm".to_string(),
                reason: "no LLM provider configured".to_string(),
            })?;
            Ok(Arc::new(LlmEntityRecognizer::new(provider)))
        }
    }
}

/// Build the configured summarizer. `llm` is required for [`SummarizerBackend::Llm`].
pub fn create_summarizer(
    config: &NlpConfig,
    llm: Option<Arc<dyn LlmProvider>>,
) -> Result<Arc<dyn Summarizer>, NlpError> {
    match config.summarizer_backend {
        SummarizerBackend::Lead => Ok(Arc::new(LeadSummarizer)),
        SummarizerBackend::Llm => {
            let provider = llm.ok_or_else(|| NlpError::Unavailable {
                backend: "llm".to_string(),
                reason: "no LLM provider configured".to_string(),
            })?;
            Ok(Arc::new(LlmSummarizer::new(provider)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_backends_need_no_llm() {
        let config = NlpConfig::default();
        assert_eq!(create_recognizer(&config, None).unwrap().name(), "gazetteer");
        assert_eq!(create_summarizer(&config, None).unwrap().name(), "lead");
    }

    #[test]
    fn llm_backends_without_provider_are_unavailable() {
        let config = NlpConfig {
            ner_backend: NerBackend::Llm,
            summarizer_backend: SummarizerBackend::Llm,
            llm: None,
        };
        assert!(matches!(
            create_recognizer(&config, None),
            Err(NlpError::Unavailable { .. })
        ));
        assert!(matches!(
            create_summarizer(&config, None),
            Err(NlpError::Unavailable { .. })
        ));
    }

    #[test]
    fn entity_label_serializes_uppercase() {
        let json = serde_json::to_string(&Entity::place("London")).unwrap();
        assert_eq!(json, r#"{"text":"London","label":"GPE"}"#);
    }
}
