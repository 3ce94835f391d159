//! Configuration for redpersona.
//!
//! Everything is read from environment variables, optionally seeded from a
//! `.env` file in the working directory. Reddit credentials may be left unset
//! and supplied interactively by the CLI.

mod helpers;
mod inference;
mod llm;

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

pub(crate) use helpers::{optional_env, parse_bool_env, parse_optional_env};
pub use inference::InferenceConfig;
pub use llm::{NerBackend, NlpConfig, OpenAiCompatibleConfig, SummarizerBackend};

#[cfg(test)]
pub(crate) use helpers::ENV_MUTEX;

use crate::error::ConfigError;

/// Main configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub reddit: RedditConfig,
    pub output: OutputConfig,
    pub nlp: NlpConfig,
    pub inference: InferenceConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            reddit: RedditConfig::resolve()?,
            output: OutputConfig::resolve()?,
            nlp: NlpConfig::resolve()?,
            inference: InferenceConfig::resolve()?,
        })
    }
}

/// Reddit API access.
#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub client_id: Option<SecretString>,
    pub client_secret: Option<SecretString>,
    pub user_agent: Option<String>,
    /// Base URL of the OAuth token endpoint host.
    pub auth_url: String,
    /// Base URL of the authenticated API host.
    pub api_url: String,
    /// Max posts and max comments fetched per handle.
    pub fetch_limit: usize,
    pub timeout: Duration,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: None,
            auth_url: "https://www.reddit.com".to_string(),
            api_url: "https://oauth.reddit.com".to_string(),
            fetch_limit: 100,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RedditConfig {
    fn resolve() -> Result<Self, ConfigError> {
        let d = Self::default();

        let fetch_limit = parse_optional_env("REDDIT_FETCH_LIMIT", d.fetch_limit)?;
        if !(1..=1000).contains(&fetch_limit) {
            return Err(ConfigError::InvalidValue {
                key: "REDDIT_FETCH_LIMIT".to_string(),
                message: "must be between 1 and 1000".to_string(),
            });
        }

        Ok(Self {
            client_id: optional_env("REDDIT_CLIENT_ID")?.map(SecretString::from),
            client_secret: optional_env("REDDIT_CLIENT_SECRET")?.map(SecretString::from),
            user_agent: optional_env("REDDIT_USER_AGENT")?,
            auth_url: optional_env("REDDIT_AUTH_URL")?.unwrap_or(d.auth_url),
            api_url: optional_env("REDDIT_API_URL")?.unwrap_or(d.api_url),
            fetch_limit,
            timeout: Duration::from_secs(parse_optional_env(
                "REDDIT_TIMEOUT_SECS",
                d.timeout.as_secs(),
            )?),
        })
    }

    /// Whether all three credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some() && self.user_agent.is_some()
    }

    /// Resolve the credentials, failing with a hint if any is missing.
    pub fn credentials(&self) -> Result<RedditCredentials, ConfigError> {
        let missing = |key: &str| ConfigError::MissingRequired {
            key: key.to_string(),
            hint: format!("Set {key} or enter it when prompted"),
        };
        let client_id = self
            .client_id
            .clone()
            .ok_or_else(|| missing("REDDIT_CLIENT_ID"))?;
        let client_secret = self
            .client_secret
            .clone()
            .ok_or_else(|| missing("REDDIT_CLIENT_SECRET"))?;
        let user_agent = self
            .user_agent
            .clone()
            .ok_or_else(|| missing("REDDIT_USER_AGENT"))?;
        Ok(RedditCredentials {
            client_id,
            client_secret,
            user_agent,
        })
    }
}

/// Credentials for application-only OAuth.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: SecretString,
    pub client_secret: SecretString,
    pub user_agent: String,
}

impl RedditCredentials {
    pub fn client_id(&self) -> &str {
        self.client_id.expose_secret()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

/// Where rendered personas go and which handles to process.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Raw comma-separated handle list; prompted for when absent.
    pub handles: Option<String>,
    pub json_log: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            handles: None,
            json_log: false,
        }
    }
}

impl OutputConfig {
    fn resolve() -> Result<Self, ConfigError> {
        Ok(Self {
            dir: optional_env("PERSONA_OUTPUT_DIR")?
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            handles: optional_env("PERSONA_HANDLES")?,
            json_log: parse_bool_env("PERSONA_LOG_JSON", false)?,
        })
    }
}
