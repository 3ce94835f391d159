//! Subreddit activity histogram and interest ranking.

use std::cmp::Reverse;

use serde::Serialize;

use crate::config::InferenceConfig;
use crate::reddit::RawActivity;
use crate::signals::lexicon::{TECH_SUBREDDITS, is_general, is_tech};

/// Post and comment counts per lower-cased subreddit, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityHistogram {
    entries: Vec<(String, usize)>,
}

impl ActivityHistogram {
    pub fn from_activity(raw: &RawActivity) -> Self {
        let mut histogram = Self::default();
        for subreddit in raw.subreddits() {
            histogram.record(subreddit);
        }
        histogram
    }

    fn record(&mut self, subreddit: &str) {
        let key = subreddit.to_lowercase();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Number of distinct subreddits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn count(&self, subreddit: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == subreddit)
            .map_or(0, |(_, c)| *c)
    }

    /// Whether `subreddit` holds at least `share` of all activity.
    pub fn meets_share(&self, subreddit: &str, share: f64) -> bool {
        let count = self.count(subreddit);
        count > 0 && count as f64 >= share * self.total() as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), *c))
    }

    /// Activity in tech subreddits.
    pub fn tech_activity(&self) -> usize {
        TECH_SUBREDDITS.iter().map(|s| self.count(s)).sum()
    }
}

/// A subreddit surfaced as an interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interest {
    pub subreddit: String,
    pub count: usize,
    pub tech: bool,
}

/// Rank eligible subreddits: tech first, then by count. The sort is stable, so
/// equal counts keep first-seen order.
pub fn select_interests(histogram: &ActivityHistogram, config: &InferenceConfig) -> Vec<Interest> {
    let threshold = config.interest_share * histogram.total() as f64;

    let mut eligible: Vec<Interest> = histogram
        .iter()
        .filter(|(name, count)| {
            is_tech(name) || (!is_general(name) && *count as f64 >= threshold)
        })
        .map(|(name, count)| Interest {
            subreddit: name.to_string(),
            count,
            tech: is_tech(name),
        })
        .collect();

    eligible.sort_by_key(|i| (Reverse(i.tech), Reverse(i.count)));
    eligible.truncate(config.max_interests);
    eligible
}

/// Interest names joined for display.
pub fn format_interests(interests: &[Interest]) -> String {
    if interests.is_empty() {
        return "General discussions".to_string();
    }
    interests
        .iter()
        .map(|i| i.subreddit.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(entries: &[(&str, usize)]) -> ActivityHistogram {
        let mut h = ActivityHistogram::default();
        for (name, count) in entries {
            for _ in 0..*count {
                h.record(name);
            }
        }
        h
    }

    #[test]
    fn counts_case_insensitively_in_first_seen_order() {
        let h = histogram(&[("Rust", 2), ("rust", 1), ("AskNYC", 1)]);
        let entries: Vec<_> = h.iter().collect();
        assert_eq!(entries, vec![("rust", 3), ("asknyc", 1)]);
        assert_eq!(h.total(), 4);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn tech_outranks_count() {
        let h = histogram(&[("gaming", 50), ("chatgpt", 1)]);
        let interests = select_interests(&h, &InferenceConfig::default());
        assert_eq!(format_interests(&interests), "chatgpt, gaming");
    }

    #[test]
    fn general_and_rare_subreddits_excluded() {
        // total 100: askreddit never surfaces, cooking (4) is under 5%.
        let h = histogram(&[("askreddit", 60), ("rust", 36), ("cooking", 4)]);
        let interests = select_interests(&h, &InferenceConfig::default());
        assert_eq!(format_interests(&interests), "rust");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let h = histogram(&[("zebra", 1), ("apple", 1)]);
        let interests = select_interests(&h, &InferenceConfig::default());
        assert_eq!(format_interests(&interests), "zebra, apple");

        let h = histogram(&[("gaming", 2), ("zebra", 1), ("chatgpt", 1), ("apple", 1)]);
        let interests = select_interests(&h, &InferenceConfig::default());
        assert_eq!(format_interests(&interests), "chatgpt, gaming, zebra, apple");
    }

    #[test]
    fn keeps_top_five() {
        let h = histogram(&[("a", 6), ("b", 5), ("c", 4), ("d", 3), ("e", 2), ("f", 1)]);
        let config = InferenceConfig {
            interest_share: 0.0,
            ..InferenceConfig::default()
        };
        assert_eq!(select_interests(&h, &config).len(), 5);
    }

    #[test]
    fn no_interests_means_general_discussions() {
        let h = ActivityHistogram::default();
        assert!(select_interests(&h, &InferenceConfig::default()).is_empty());
        assert_eq!(format_interests(&[]), "General discussions");
    }

    #[test]
    fn share_and_tech_activity() {
        let h = histogram(&[("asknyc", 1), ("visionpro", 9), ("chatgpt", 10)]);
        assert!(h.meets_share("asknyc", 0.05));
        assert!(!h.meets_share("asknyc", 0.5));
        assert!(!h.meets_share("boston", 0.0));
        assert_eq!(h.tech_activity(), 19);
    }
}
