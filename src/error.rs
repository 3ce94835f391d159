//! Error types for redpersona.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type: setup failures and per-handle persist failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("NLP error: {0}")]
    Nlp(#[from] NlpError),

    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Failures while fetching a user's activity from Reddit.
///
/// These never escape [`crate::reddit::acquire`]; they are logged and the
/// handle degrades to an empty activity record.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("User u/{handle} not found")]
    UserNotFound { handle: String },

    #[error("User u/{handle} is suspended")]
    Suspended { handle: String },

    #[error("Authentication with Reddit failed: {reason}")]
    AuthFailed { reason: String },

    #[error("Reddit rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Reddit request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid response from Reddit: {reason}")]
    InvalidResponse { reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Entity recognition and summarization errors.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("LLM backend failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Backend {backend} returned unusable output: {reason}")]
    InvalidOutput { backend: String, reason: String },

    #[error("Backend {backend} unavailable: {reason}")]
    Unavailable { backend: String, reason: String },
}

/// Errors writing rendered personas to disk.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
