//! LLM integration used by the `llm` NER and summarizer backends.
//!
//! Only the OpenAI Chat Completions wire format is supported; that covers
//! hosted APIs as well as local servers (Ollama, LM Studio, vLLM).

mod openai_compatible;
mod provider;

pub use openai_compatible::OpenAiCompatibleProvider;
pub use provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};

use std::sync::Arc;

use crate::config::OpenAiCompatibleConfig;
use crate::error::LlmError;

/// Build the provider shared by both `llm` backends.
pub fn create_llm_provider(
    config: &OpenAiCompatibleConfig,
) -> Result<Arc<dyn LlmProvider>, LlmError> {
    tracing::info!(base_url = %config.base_url, model = %config.model, "LLM endpoint configured");
    Ok(Arc::new(OpenAiCompatibleProvider::new(config.clone())?))
}
