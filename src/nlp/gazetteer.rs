//! Local entity recognizer.
//!
//! Finds runs of capitalized words, tags runs found in a place gazetteer as
//! GPE and the remaining runs (minus common capitalized function words) as
//! PERSON. Crude next to a statistical model, but deterministic and free.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::NlpError;
use crate::nlp::{Entity, EntityLabel, EntityRecognizer};

static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][\p{L}'’\-]*(?:[ \t]+[A-Z][\p{L}'’\-]*)*").expect("valid regex")
});

/// Known places, lower-case. Multi-word entries are matched before their parts.
const PLACES: &[&str] = &[
    "new york city",
    "new york",
    "nyc",
    "brooklyn",
    "queens",
    "manhattan",
    "london",
    "england",
    "uk",
    "germany",
    "trier",
    "berlin",
    "munich",
    "san francisco",
    "bay area",
    "boston",
    "toronto",
    "canada",
    "california",
    "usa",
    "america",
    "paris",
    "france",
    "india",
    "tokyo",
    "japan",
];

/// Longest gazetteer entry, in words.
const MAX_PLACE_WORDS: usize = 3;

/// Capitalized words that are almost never names.
const FUNCTION_WORDS: &[&str] = &[
    "i", "i'm", "i’m", "i've", "i'd", "i'll", "im", "the", "a", "an", "and", "but", "or", "so",
    "if", "my", "we", "you", "he", "she", "it", "they", "this", "that", "these", "those", "what",
    "when", "where", "why", "how", "who", "is", "are", "was", "not", "no", "yes", "thanks",
    "thank", "hi", "hey", "hello", "edit", "update", "also", "just", "in", "on", "at", "for",
    "to", "of", "with", "as", "by", "from", "any", "all", "some", "has", "have", "do", "does",
    "did", "can", "will", "would", "should", "could", "there", "here", "then", "now", "our",
    "your", "their", "his", "her", "its", "ai", "ar", "vr", "ok", "lol",
];

/// Capitalized-span recognizer backed by a place gazetteer.
#[derive(Debug, Default)]
pub struct GazetteerRecognizer;

impl GazetteerRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn scan(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for run in CAPITALIZED_RUN.find_iter(text) {
            let words: Vec<&str> = run.as_str().split_whitespace().collect();
            tag_run(&words, &mut entities);
        }
        entities
    }
}

/// Split one capitalized run into place matches and person candidates.
fn tag_run(words: &[&str], out: &mut Vec<Entity>) {
    let mut pending: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < words.len() {
        if let Some(len) = place_at(&words[i..]) {
            flush_person(&mut pending, out);
            out.push(Entity {
                text: words[i..i + len].join(" "),
                label: EntityLabel::Gpe,
            });
            i += len;
            continue;
        }

        let word = words[i];
        if is_function_word(word) {
            flush_person(&mut pending, out);
        } else {
            pending.push(word);
        }
        i += 1;
    }
    flush_person(&mut pending, out);
}

/// Length of the longest gazetteer entry starting at `words[0]`.
fn place_at(words: &[&str]) -> Option<usize> {
    let longest = words.len().min(MAX_PLACE_WORDS);
    (1..=longest).rev().find(|&len| {
        let candidate = words[..len]
            .iter()
            .map(|w| trim_word(w).to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        PLACES.contains(&candidate.as_str())
    })
}

fn flush_person(pending: &mut Vec<&str>, out: &mut Vec<Entity>) {
    if pending.is_empty() {
        return;
    }
    let text = pending
        .iter()
        .map(|w| trim_word(w))
        .collect::<Vec<_>>()
        .join(" ");
    // Names rarely run past three words; longer runs are titles or shouting.
    if pending.len() <= 3 && !text.is_empty() {
        out.push(Entity::person(text));
    }
    pending.clear();
}

fn is_function_word(word: &str) -> bool {
    let lower = trim_word(word).to_lowercase();
    FUNCTION_WORDS.contains(&lower.as_str())
}

/// Strip possessive endings and stray punctuation ("Sam's" -> "Sam").
fn trim_word(word: &str) -> &str {
    let word = word
        .strip_suffix("'s")
        .or_else(|| word.strip_suffix("’s"))
        .unwrap_or(word);
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

#[async_trait]
impl EntityRecognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NlpError> {
        Ok(self.scan(text))
    }
}
