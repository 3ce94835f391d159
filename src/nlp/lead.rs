//! Extractive summarizer: keeps leading sentences up to the word budget.

use async_trait::async_trait;

use crate::error::NlpError;
use crate::nlp::{SummaryBounds, Summarizer};

#[derive(Debug, Default, Clone, Copy)]
pub struct LeadSummarizer;

impl LeadSummarizer {
    fn lead(text: &str, bounds: SummaryBounds) -> String {
        let text = text.trim();
        let max = bounds.max.max(1) as usize;
        let total_words = text.split_whitespace().count();
        if total_words <= bounds.min as usize {
            return text.to_string();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut words = 0;
        for sentence in sentences(text) {
            let count = sentence.split_whitespace().count();
            if words + count > max {
                break;
            }
            kept.push(sentence);
            words += count;
        }

        if kept.is_empty() {
            // First sentence alone is over budget; clip it.
            return text
                .split_whitespace()
                .take(max)
                .collect::<Vec<_>>()
                .join(" ");
        }
        kept.join(" ")
    }
}

/// Split after sentence-ending punctuation followed by whitespace.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?')
                && let Some(&(_, next)) = chars.peek()
                && next.is_whitespace()
            {
                let end = i + c.len_utf8();
                let sentence = rest[..end].trim();
                rest = rest[end..].trim_start();
                return Some(sentence);
            }
        }
        let sentence = rest.trim();
        rest = "";
        Some(sentence)
    })
    .filter(|s| !s.is_empty())
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    fn name(&self) -> &str {
        "lead"
    }

    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, NlpError> {
        Ok(Self::lead(text, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: SummaryBounds = SummaryBounds { min: 3, max: 8 };

    #[test]
    fn short_input_returned_trimmed() {
        assert_eq!(LeadSummarizer::lead("  AI and VR  ", BOUNDS), "AI and VR");
        assert_eq!(LeadSummarizer::lead("", BOUNDS), "");
    }

    #[test]
    fn keeps_whole_leading_sentences() {
        let text = "AI is fun. VR is fun too. This third sentence will not fit at all.";
        assert_eq!(
            LeadSummarizer::lead(text, BOUNDS),
            "AI is fun. VR is fun too."
        );
    }

    #[test]
    fn clips_an_oversized_first_sentence() {
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(
            LeadSummarizer::lead(text, BOUNDS),
            "one two three four five six seven eight"
        );
    }

    #[test]
    fn sentence_split_ignores_inner_dots() {
        let parts: Vec<&str> = sentences("Version 1.5 shipped. Nice!").collect();
        assert_eq!(parts, vec!["Version 1.5 shipped.", "Nice!"]);
    }
}
