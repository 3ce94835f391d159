//! Chat-completions client for OpenAI-style endpoints.
//!
//! Works with hosted APIs and local servers alike (Ollama, LM Studio, vLLM);
//! only `POST {base}/v1/chat/completions` is used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::OpenAiCompatibleConfig;
use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};
use crate::util::floor_char_boundary;

const PROVIDER: &str = "openai_compatible";

/// Bytes of an error body quoted in error messages.
const ERROR_PREVIEW: usize = 200;

pub struct OpenAiCompatibleProvider {
    client: Client,
    endpoint: String,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| request_failed(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            config,
        })
    }

    fn request(&self, body: &WireRequest<'_>) -> reqwest::RequestBuilder {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }
        for (name, value) in &self.config.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }
}

/// `{base}/v1/chat/completions`, tolerating a base that already ends in `/v1`.
fn completions_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{base}/v1/chat/completions")
}

fn request_failed(reason: String) -> LlmError {
    LlmError::RequestFailed {
        provider: PROVIDER.to_string(),
        reason,
    }
}

/// Map a non-success status to the matching error.
fn status_error(status: StatusCode, retry_after: Option<Duration>, body: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthFailed {
            provider: PROVIDER.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            provider: PROVIDER.to_string(),
            retry_after,
        },
        _ => request_failed(format!(
            "HTTP {status}: {}",
            &body[..floor_char_boundary(body, ERROR_PREVIEW)]
        )),
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = WireRequest {
            model: &self.config.model,
            messages: req.messages.iter().map(WireMessage::from).collect(),
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };
        tracing::debug!(endpoint = %self.endpoint, model = %self.config.model, "Chat completion request");

        let response = self.request(&body).send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "Chat completion failed");
            return Err(status_error(status, retry_after, &text));
        }

        let parsed: WireResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!(
                    "{e}; body starts with: {}",
                    &text[..floor_char_boundary(&text, ERROR_PREVIEW)]
                ),
            })?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response has no choices".to_string(),
            });
        };
        let usage = parsed.usage.unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason: FinishReason::from_wire(choice.finish_reason.as_deref()),
        })
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReply,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
