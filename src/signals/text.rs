//! Text-level signals: the summarizer input and engagement counts.

use serde::Serialize;

use crate::signals::lexicon::{INSIGHT_KEYWORDS, NOISE_PHRASES, TECH_KEYWORDS, keyword_hits};
use crate::util::truncate_chars;

/// Keyword hits a sentence needs to count as tech talk.
const MIN_TECH_HITS: usize = 2;

pub fn is_noise(text: &str) -> bool {
    let lower = text.to_lowercase();
    NOISE_PHRASES.iter().any(|p| lower.contains(p))
}

/// Tech-focused sentences from the user's texts, capped at `max_chars`.
///
/// Texts that are blank or contain a noise phrase are skipped entirely.
pub fn summary_input<'a>(texts: impl IntoIterator<Item = &'a str>, max_chars: usize) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for text in texts {
        if text.trim().is_empty() || is_noise(text) {
            continue;
        }
        kept.extend(
            text.split(". ")
                .filter(|s| keyword_hits(&s.to_lowercase(), TECH_KEYWORDS) >= MIN_TECH_HITS),
        );
    }
    let joined = kept.join(" ");
    truncate_chars(&joined, max_chars).to_string()
}

/// Remove noise phrases from summarizer output and tidy the spacing.
pub fn scrub_summary(summary: &str) -> String {
    let mut out = summary.to_string();
    for phrase in NOISE_PHRASES {
        out = out.replace(phrase, "");
    }
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.trim().to_string()
}

/// How many texts ask questions or offer insight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngagementCounts {
    pub texts: usize,
    pub questions: usize,
    pub insights: usize,
}

impl EngagementCounts {
    pub fn tally<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for text in texts {
            counts.texts += 1;
            if text.contains('?') {
                counts.questions += 1;
            }
            if keyword_hits(&text.to_lowercase(), INSIGHT_KEYWORDS) > 0 {
                counts.insights += 1;
            }
        }
        counts
    }
}
