use std::time::Duration;

use secrecy::SecretString;

use crate::config::helpers::{optional_env, parse_optional_env};
use crate::error::ConfigError;

/// Which entity recognizer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NerBackend {
    /// Local capitalized-span recognizer with a place gazetteer.
    #[default]
    Gazetteer,
    /// Entity extraction through an OpenAI-compatible chat model.
    Llm,
}

impl std::str::FromStr for NerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gazetteer" | "local" => Ok(Self::Gazetteer),
            "llm" | "openai_compatible" => Ok(Self::Llm),
            _ => Err(format!(
                "invalid NER backend '{}', expected 'gazetteer' or 'llm'",
                s
            )),
        }
    }
}

impl std::fmt::Display for NerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gazetteer => write!(f, "gazetteer"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Which summarizer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummarizerBackend {
    /// Local extractive summarizer (leading sentences, word-bounded).
    #[default]
    Lead,
    /// Abstractive summary through an OpenAI-compatible chat model.
    Llm,
}

impl std::str::FromStr for SummarizerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" | "extractive" | "local" => Ok(Self::Lead),
            "llm" | "openai_compatible" => Ok(Self::Llm),
            _ => Err(format!(
                "invalid summarizer backend '{}', expected 'lead' or 'llm'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SummarizerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Configuration for any OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub model: String,
    /// Extra HTTP headers injected into every LLM request.
    /// Parsed from `LLM_EXTRA_HEADERS` env var (format: `Key:Value,Key2:Value2`).
    pub extra_headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Entity recognition and summarization configuration.
#[derive(Debug, Clone, Default)]
pub struct NlpConfig {
    pub ner_backend: NerBackend,
    pub summarizer_backend: SummarizerBackend,
    /// Present whenever `LLM_BASE_URL` is set; required by the `llm` backends.
    pub llm: Option<OpenAiCompatibleConfig>,
}

impl NlpConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let ner_backend = parse_backend::<NerBackend>("NER_BACKEND")?;
        let summarizer_backend = parse_backend::<SummarizerBackend>("SUMMARIZER_BACKEND")?;

        let llm = match optional_env("LLM_BASE_URL")? {
            Some(base_url) => {
                let model = optional_env("LLM_MODEL")?.ok_or_else(|| {
                    ConfigError::MissingRequired {
                        key: "LLM_MODEL".to_string(),
                        hint: "Set LLM_MODEL alongside LLM_BASE_URL".to_string(),
                    }
                })?;
                let extra_headers = optional_env("LLM_EXTRA_HEADERS")?
                    .map(|val| parse_extra_headers(&val))
                    .transpose()?
                    .unwrap_or_default();
                Some(OpenAiCompatibleConfig {
                    base_url,
                    api_key: optional_env("LLM_API_KEY")?.map(SecretString::from),
                    model,
                    extra_headers,
                    timeout: Duration::from_secs(parse_optional_env("LLM_TIMEOUT_SECS", 120u64)?),
                })
            }
            None => None,
        };

        let needs_llm =
            ner_backend == NerBackend::Llm || summarizer_backend == SummarizerBackend::Llm;
        if needs_llm && llm.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "LLM_BASE_URL".to_string(),
                hint: "Set LLM_BASE_URL and LLM_MODEL when NER_BACKEND or SUMMARIZER_BACKEND is 'llm'"
                    .to_string(),
            });
        }

        Ok(Self {
            ner_backend,
            summarizer_backend,
            llm,
        })
    }
}

fn parse_backend<T>(key: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match optional_env(key)? {
        Some(s) => s.parse().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        }),
        None => Ok(T::default()),
    }
}

fn parse_extra_headers(val: &str) -> Result<Vec<(String, String)>, ConfigError> {
    if val.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut headers = Vec::new();
    for pair in val.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((key, value)) = pair.split_once(':') else {
            return Err(ConfigError::InvalidValue {
                key: "LLM_EXTRA_HEADERS".to_string(),
                message: format!("malformed header entry '{}', expected Key:Value", pair),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "LLM_EXTRA_HEADERS".to_string(),
                message: format!("empty header name in entry '{}'", pair),
            });
        }
        headers.push((key.to_string(), value.trim().to_string()));
    }
    Ok(headers)
}
