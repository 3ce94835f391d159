//! Pipeline runs that write personas to a temporary output directory.

use std::sync::Arc;

use async_trait::async_trait;

use redpersona::config::InferenceConfig;
use redpersona::error::{AcquisitionError, Error, NlpError, PersistError};
use redpersona::nlp::{GazetteerRecognizer, SummaryBounds, Summarizer};
use redpersona::pipeline::{PipelineContext, html_path, report_html_files, text_path};
use redpersona::reddit::{ActivitySource, Comment, Post, RawActivity};

struct OneUserSource;

#[async_trait]
impl ActivitySource for OneUserSource {
    async fn fetch(&self, handle: &str) -> Result<RawActivity, AcquisitionError> {
        if handle == "ghost" {
            return Err(AcquisitionError::UserNotFound {
                handle: handle.to_string(),
            });
        }
        Ok(RawActivity {
            handle: handle.to_string(),
            posts: vec![Post {
                text: "Vision Pro and AI tech demo ".to_string(),
                subreddit: "visionpro".to_string(),
                url: "https://www.reddit.com/r/visionpro/comments/p1/demo/".to_string(),
                upvotes: 12,
                comment_count: 1,
            }],
            comments: vec![Comment {
                text: "Any recommendations for AR headsets?".to_string(),
                subreddit: "virtualreality".to_string(),
                url: "https://www.reddit.com/r/virtualreality/comments/x/c1/".to_string(),
            }],
            karma: 321,
            exists: true,
        })
    }
}

/// Always fails, so every persona carries the fallback summary.
struct OfflineSummarizer;

#[async_trait]
impl Summarizer for OfflineSummarizer {
    fn name(&self) -> &str {
        "offline"
    }

    async fn summarize(&self, _text: &str, _bounds: SummaryBounds) -> Result<String, NlpError> {
        Err(NlpError::Unavailable {
            backend: "offline".to_string(),
            reason: "no model loaded".to_string(),
        })
    }
}

fn context(output_dir: &std::path::Path) -> PipelineContext {
    PipelineContext {
        source: Arc::new(OneUserSource),
        recognizer: Arc::new(GazetteerRecognizer::new()),
        summarizer: Arc::new(OfflineSummarizer),
        inference: InferenceConfig::default(),
        output_dir: output_dir.to_path_buf(),
    }
}

#[tokio::test]
async fn writes_text_and_html_for_each_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("personas");
    let ctx = context(&out);
    let handles = vec!["kojied".to_string(), "ghost".to_string()];

    let summary = ctx.run(&handles).await;
    assert_eq!(summary.written.len(), 2);
    assert!(summary.failed.is_empty());

    let text = std::fs::read_to_string(text_path(&out, "kojied")).expect("text persona");
    assert!(text.starts_with("User Persona for u/kojied\n"));
    assert!(text.contains("- Interests: visionpro, virtualreality [Sources: "));
    assert!(text.contains(
        "Kojied is interested in AR/VR and AI technologies, engaging in related discussions."
    ));

    let html = std::fs::read_to_string(html_path(&out, "kojied")).expect("html persona");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Curious, innovative, and tech-enthusiastic."));

    let ghost = std::fs::read_to_string(text_path(&out, "ghost")).expect("ghost persona");
    assert!(ghost.contains("- About: No data available for u/ghost. [Sources: ]"));

    let links = report_html_files(&out, &handles);
    assert_eq!(links.len(), 2);
}

#[tokio::test]
async fn continues_after_a_failing_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory where the text file should go makes the write fail.
    std::fs::create_dir_all(text_path(dir.path(), "blocked")).expect("blocker");

    let ctx = context(dir.path());
    let handles = vec!["blocked".to_string(), "kojied".to_string()];
    let summary = ctx.run(&handles).await;

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "blocked");
    assert!(matches!(
        summary.failed[0].1,
        Error::Persist(PersistError::Io { .. })
    ));
    assert_eq!(summary.written.len(), 1);
    assert!(html_path(dir.path(), "kojied").exists());

    let links = report_html_files(dir.path(), &handles);
    assert_eq!(links.len(), 1);
}
