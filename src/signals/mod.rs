//! Signal extraction: everything the persona rules need, derived from raw activity.
//!
//! Pure table-driven steps live in the submodules. [`extract`] wires them
//! together with the two language capabilities, which are the only places
//! extraction can fail; both failures degrade instead of propagating.

pub mod activity;
pub mod age;
pub mod lexicon;
pub mod location;
pub mod text;

pub use activity::{ActivityHistogram, Interest, format_interests, select_interests};
pub use location::EntityFindings;
pub use text::EngagementCounts;

use serde::Serialize;

use crate::config::InferenceConfig;
use crate::nlp::{EntityRecognizer, Summarizer, SummaryBounds};
use crate::reddit::RawActivity;
use crate::signals::lexicon::is_tech;
use crate::util::capitalize;

/// Facts extracted from one user's activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub histogram: ActivityHistogram,
    pub interests: Vec<Interest>,
    /// Summarizer output, or the templated fallback.
    pub summary: String,
    pub engagement: EngagementCounts,
    pub place: Option<String>,
    pub display_name: Option<String>,
    pub age: Option<u32>,
    /// Upvotes summed over posts in tech subreddits.
    pub tech_upvotes: i64,
}

/// Sentence used when there is nothing to summarize or the summarizer fails.
pub fn fallback_summary(handle: &str) -> String {
    format!(
        "{} is interested in AR/VR and AI technologies, engaging in related discussions.",
        capitalize(handle)
    )
}

/// Summarize the tech-focused part of the user's texts.
pub async fn summarize_activity(
    summarizer: &dyn Summarizer,
    raw: &RawActivity,
    config: &InferenceConfig,
) -> String {
    let input = text::summary_input(raw.texts(), config.summary_chars);
    tracing::debug!(handle = %raw.handle, input = %input, "Summary input");
    if input.is_empty() {
        return fallback_summary(&raw.handle);
    }

    let bounds = SummaryBounds {
        min: config.summary_min,
        max: config.summary_max,
    };
    match summarizer.summarize(&input, bounds).await {
        Ok(summary) => {
            let summary = text::scrub_summary(&summary);
            if summary.is_empty() {
                fallback_summary(&raw.handle)
            } else {
                summary
            }
        }
        Err(e) => {
            tracing::error!(
                handle = %raw.handle,
                backend = summarizer.name(),
                error = %e,
                "Error summarizing text"
            );
            fallback_summary(&raw.handle)
        }
    }
}

/// Run every extraction step over `raw`.
pub async fn extract(
    raw: &RawActivity,
    recognizer: &dyn EntityRecognizer,
    summarizer: &dyn Summarizer,
    config: &InferenceConfig,
) -> Signals {
    let histogram = ActivityHistogram::from_activity(raw);
    tracing::info!(handle = %raw.handle, subreddits = histogram.len(), total = histogram.total(), "Subreddit activity");

    let interests = select_interests(&histogram, config);
    let summary = summarize_activity(summarizer, raw, config).await;
    let engagement = EngagementCounts::tally(raw.texts());

    let subreddit_place = location::place_from_subreddits(&histogram, config);
    let entities = match subreddit_place {
        Some(place) => {
            tracing::info!(handle = %raw.handle, place, "Place matched from subreddit activity");
            EntityFindings::default()
        }
        None => location::scan_entities(recognizer, raw.texts()).await,
    };

    let tech_upvotes = raw
        .posts
        .iter()
        .filter(|p| is_tech(&p.subreddit.to_lowercase()))
        .map(|p| p.upvotes)
        .sum();

    Signals {
        interests,
        summary,
        engagement,
        place: subreddit_place.or(entities.place).map(str::to_string),
        display_name: entities.name,
        age: age::infer_age(raw.texts()),
        tech_upvotes,
        histogram,
    }
}
