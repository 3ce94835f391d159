//! Per-handle pipeline: acquire, extract, assemble, render, persist.
//!
//! Handles are processed one at a time. A failure on one handle is logged
//! and the run moves on to the next.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Config, InferenceConfig};
use crate::error::{Error, PersistError};
use crate::llm::create_llm_provider;
use crate::nlp::{EntityRecognizer, Summarizer, create_recognizer, create_summarizer};
use crate::persona::{self, Persona};
use crate::reddit::{self, ActivitySource, RawActivity, RedditClient};
use crate::render::{render_html, render_text};
use crate::signals;

/// Collaborators built once at startup and shared by every handle.
pub struct PipelineContext {
    pub source: Arc<dyn ActivitySource>,
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub summarizer: Arc<dyn Summarizer>,
    pub inference: InferenceConfig,
    pub output_dir: PathBuf,
}

/// Files written for one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaFiles {
    pub text: PathBuf,
    pub html: PathBuf,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<(String, PersonaFiles)>,
    pub failed: Vec<(String, Error)>,
}

pub fn text_path(dir: &Path, handle: &str) -> PathBuf {
    dir.join(format!("{handle}_persona.txt"))
}

pub fn html_path(dir: &Path, handle: &str) -> PathBuf {
    dir.join(format!("{handle}_persona.html"))
}

impl PipelineContext {
    /// Build every collaborator from `config`. Reddit credentials must be set.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let credentials = config.reddit.credentials()?;
        let llm = config
            .nlp
            .llm
            .as_ref()
            .map(create_llm_provider)
            .transpose()?;
        let recognizer = create_recognizer(&config.nlp, llm.clone())?;
        let summarizer = create_summarizer(&config.nlp, llm)?;
        tracing::info!(
            ner = recognizer.name(),
            summarizer = summarizer.name(),
            "Language backends ready"
        );

        Ok(Self {
            source: Arc::new(RedditClient::new(&config.reddit, credentials)?),
            recognizer,
            summarizer,
            inference: config.inference.clone(),
            output_dir: config.output.dir.clone(),
        })
    }

    /// Fetch and infer a persona. Never fails: missing users yield the sentinel.
    pub async fn build_persona(&self, handle: &str) -> (RawActivity, Persona) {
        let raw = reddit::acquire(self.source.as_ref(), handle).await;
        if !raw.exists {
            tracing::warn!(handle, "No data available");
            return (raw, Persona::sentinel(handle));
        }

        tracing::info!(handle, "Generating persona");
        let signals = signals::extract(
            &raw,
            self.recognizer.as_ref(),
            self.summarizer.as_ref(),
            &self.inference,
        )
        .await;
        let persona = persona::assemble(&raw, &signals, &self.inference);
        (raw, persona)
    }

    /// Build, render and write the persona for one handle.
    pub async fn process_handle(&self, handle: &str) -> Result<PersonaFiles, Error> {
        let (raw, persona) = self.build_persona(handle).await;
        if let Ok(json) = serde_json::to_string(&persona) {
            tracing::debug!(handle, persona = %json, "Persona assembled");
        }

        let files = PersonaFiles {
            text: text_path(&self.output_dir, handle),
            html: html_path(&self.output_dir, handle),
        };
        persist(&files.text, &render_text(&persona, &raw))?;
        tracing::info!(handle, path = %files.text.display(), "Saved text persona");
        persist(&files.html, &render_html(&persona, &raw, &self.inference))?;
        tracing::info!(handle, path = %files.html.display(), "Saved HTML persona");
        Ok(files)
    }

    /// Process every handle in order, continuing past failures.
    pub async fn run(&self, handles: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();
        for handle in handles {
            match self.process_handle(handle).await {
                Ok(files) => summary.written.push((handle.clone(), files)),
                Err(e) => {
                    tracing::error!(handle = %handle, error = %e, "Error processing handle");
                    summary.failed.push((handle.clone(), e));
                }
            }
        }
        summary
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn persist(path: &Path, contents: &str) -> Result<(), PersistError> {
    let io_err = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}

/// Log a `file://` link for each handle's HTML persona, or a warning if it is missing.
///
/// Returns the links that exist.
pub fn report_html_files(output_dir: &Path, handles: &[String]) -> Vec<String> {
    let mut links = Vec::new();
    for handle in handles {
        let path = html_path(output_dir, handle);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "HTML persona not found");
            continue;
        }
        let absolute = std::fs::canonicalize(&path).unwrap_or(path);
        let link = format!("file://{}", absolute.display());
        tracing::info!(handle = %handle, link = %link, "HTML persona");
        links.push(link);
    }
    tracing::info!(
        "To view: copy the file:// links into your browser or double-click the .html files."
    );
    links
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use secrecy::SecretString;

    use super::*;
    use crate::config::{NerBackend, NlpConfig, OutputConfig, RedditConfig};
    use crate::error::{AcquisitionError, ConfigError, NlpError};
    use crate::nlp::{GazetteerRecognizer, LeadSummarizer};

    struct NobodySource;

    #[async_trait]
    impl ActivitySource for NobodySource {
        async fn fetch(&self, handle: &str) -> Result<RawActivity, AcquisitionError> {
            Err(AcquisitionError::UserNotFound {
                handle: handle.to_string(),
            })
        }
    }

    fn context(dir: &Path) -> PipelineContext {
        PipelineContext {
            source: Arc::new(NobodySource),
            recognizer: Arc::new(GazetteerRecognizer::new()),
            summarizer: Arc::new(LeadSummarizer),
            inference: InferenceConfig::default(),
            output_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn missing_user_gets_sentinel_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = context(dir.path()).process_handle("ghost").await.unwrap();

        let text = std::fs::read_to_string(&files.text).unwrap();
        assert!(text.starts_with("User Persona for u/ghost\n- Name: Ghost User"));
        assert!(files.html.exists());
    }

    #[test]
    fn persist_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/a.txt");
        persist(&path, "hi").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hi");
    }

    #[test]
    fn report_lists_only_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        persist(&html_path(dir.path(), "here"), "<html></html>").unwrap();
        let links = report_html_files(dir.path(), &["here".into(), "gone".into()]);
        assert_eq!(links.len(), 1);
        assert!(links[0].starts_with("file://"));
        assert!(links[0].ends_with("here_persona.html"));
    }

    fn config_with_credentials() -> Config {
        Config {
            reddit: RedditConfig {
                client_id: Some(SecretString::from("id")),
                client_secret: Some(SecretString::from("secret")),
                user_agent: Some("test:redpersona:v0".to_string()),
                ..RedditConfig::default()
            },
            output: OutputConfig::default(),
            nlp: NlpConfig::default(),
            inference: InferenceConfig::default(),
        }
    }

    #[test]
    fn from_config_builds_local_backends() {
        let ctx = PipelineContext::from_config(&config_with_credentials()).unwrap();
        assert_eq!(ctx.recognizer.name(), "gazetteer");
        assert_eq!(ctx.summarizer.name(), "lead");
        assert_eq!(ctx.output_dir, PathBuf::from("."));
    }

    #[test]
    fn from_config_without_credentials_is_a_config_error() {
        let mut config = config_with_credentials();
        config.reddit.client_secret = None;
        let err = PipelineContext::from_config(&config).err().unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingRequired { ref key, .. }) if key == "REDDIT_CLIENT_SECRET"
        ));
    }

    #[test]
    fn from_config_llm_backend_without_endpoint_is_an_nlp_error() {
        let mut config = config_with_credentials();
        config.nlp.ner_backend = NerBackend::Llm;
        let err = PipelineContext::from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Nlp(NlpError::Unavailable { .. })));
    }
}
