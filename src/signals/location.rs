//! Place and display-name resolution from subreddits and named entities.

use crate::config::InferenceConfig;
use crate::nlp::{EntityLabel, EntityRecognizer};
use crate::signals::activity::ActivityHistogram;
use crate::signals::lexicon::{
    CITY_SUBREDDITS, COMMON_NAMES, LOCATIONS, NAME_BLOCKLIST, PRIORITY_CITY_SUBREDDITS,
    STATE_SUBREDDIT, location_of,
};

/// Place implied by where the user posts, if any subreddit is strong enough.
pub fn place_from_subreddits(
    histogram: &ActivityHistogram,
    config: &InferenceConfig,
) -> Option<&'static str> {
    if let Some(place) = histogram
        .iter()
        .filter(|(name, _)| PRIORITY_CITY_SUBREDDITS.contains(name))
        .find(|(name, _)| histogram.meets_share(name, config.nyc_share))
        .and_then(|(name, _)| location_of(name))
    {
        return Some(place);
    }

    let mut cities: Vec<(&str, usize)> = histogram
        .iter()
        .filter(|(name, _)| CITY_SUBREDDITS.contains(name))
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    cities.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(place) = cities
        .iter()
        .find(|(name, _)| histogram.meets_share(name, config.city_share))
        .and_then(|(name, _)| location_of(name))
    {
        return Some(place);
    }

    if histogram.meets_share(STATE_SUBREDDIT, config.state_share) {
        return location_of(STATE_SUBREDDIT);
    }
    None
}

/// Whether a PERSON entity is plausible as the user's display name.
pub fn accept_person(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    !lower.is_empty()
        && !NAME_BLOCKLIST.contains(&lower.as_str())
        && COMMON_NAMES.iter().any(|n| lower.contains(n))
        && !LOCATIONS
            .iter()
            .any(|(_, place)| place.to_lowercase().contains(&lower))
}

/// Location value a GPE entity refers to: the first one containing it.
pub fn place_for_entity(text: &str) -> Option<&'static str> {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    LOCATIONS
        .iter()
        .find(|(_, place)| place.to_lowercase().contains(&lower))
        .map(|(_, place)| *place)
}

/// Result of the entity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFindings {
    pub name: Option<String>,
    pub place: Option<&'static str>,
}

impl EntityFindings {
    fn complete(&self) -> bool {
        self.name.is_some() && self.place.is_some()
    }
}

/// Scan texts in order for a display name and a place.
///
/// Only run when subreddit activity left the place unresolved. The first
/// qualifying entity for each field wins. Recognizer errors are logged and
/// the text is treated as having no entities.
pub async fn scan_entities<'a>(
    recognizer: &dyn EntityRecognizer,
    texts: impl IntoIterator<Item = &'a str>,
) -> EntityFindings {
    let mut findings = EntityFindings::default();

    for text in texts {
        if text.trim().is_empty() {
            continue;
        }
        let entities = match recognizer.recognize(text).await {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!(backend = recognizer.name(), error = %e, "Entity recognition failed");
                continue;
            }
        };

        for entity in entities {
            match entity.label {
                EntityLabel::Person if findings.name.is_none() && accept_person(&entity.text) => {
                    findings.name = Some(entity.text.trim().to_string());
                }
                EntityLabel::Gpe if findings.place.is_none() => {
                    findings.place = place_for_entity(&entity.text);
                }
                _ => {}
            }
        }

        if findings.complete() {
            break;
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::NlpError;
    use crate::nlp::{Entity, GazetteerRecognizer};

    fn histogram(subreddits: &[(&str, usize)]) -> ActivityHistogram {
        use crate::reddit::{Comment, RawActivity};
        let comments = subreddits
            .iter()
            .flat_map(|(name, count)| {
                std::iter::repeat_n(
                    Comment {
                        text: String::new(),
                        subreddit: name.to_string(),
                        url: String::new(),
                    },
                    *count,
                )
            })
            .collect();
        ActivityHistogram::from_activity(&RawActivity {
            handle: "u".into(),
            posts: Vec::new(),
            comments,
            karma: 0,
            exists: true,
        })
    }

    #[test]
    fn nyc_needs_only_a_small_share() {
        let h = histogram(&[("gaming", 19), ("asknyc", 1)]);
        assert_eq!(
            place_from_subreddits(&h, &InferenceConfig::default()),
            Some("New York City, NY")
        );
    }

    #[test]
    fn cities_need_a_majority() {
        let config = InferenceConfig::default();
        let h = histogram(&[("boston", 5), ("gaming", 5)]);
        assert_eq!(place_from_subreddits(&h, &config), Some("Boston, MA"));

        let h = histogram(&[("boston", 4), ("gaming", 6)]);
        assert_eq!(place_from_subreddits(&h, &config), None);
    }

    #[test]
    fn california_needs_seventy_percent() {
        let config = InferenceConfig::default();
        let h = histogram(&[("california", 7), ("gaming", 3)]);
        assert_eq!(place_from_subreddits(&h, &config), Some("California, USA"));

        let h = histogram(&[("california", 6), ("gaming", 4)]);
        assert_eq!(place_from_subreddits(&h, &config), None);
    }

    #[test]
    fn person_filters() {
        assert!(accept_person("Alex Kim"));
        assert!(!accept_person("Manhattan"));
        assert!(!accept_person("Bob"));
        assert!(!accept_person("Really"));
    }

    #[test]
    fn gpe_maps_to_first_containing_location() {
        assert_eq!(place_for_entity("York"), Some("New York City, NY"));
        assert_eq!(place_for_entity("Germany"), Some("Trier, Germany"));
        assert_eq!(place_for_entity("Paris"), None);
        assert_eq!(place_for_entity(" "), None);
    }

    #[tokio::test]
    async fn first_match_per_field_wins() {
        let texts = [
            "I met Sam yesterday",
            "Flew to London with Sarah",
            "Then Boston",
        ];
        let findings = scan_entities(&GazetteerRecognizer::new(), texts).await;
        assert_eq!(findings.name.as_deref(), Some("Sam"));
        assert_eq!(findings.place, Some("London, UK"));
    }

    #[tokio::test]
    async fn stops_once_both_fields_resolve() {
        let findings = scan_entities(
            &GazetteerRecognizer::new(),
            ["Chris moved to London", "Alex Kim lives in Boston"],
        )
        .await;
        assert_eq!(findings.name.as_deref(), Some("Chris"));
        assert_eq!(findings.place, Some("London, UK"));
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl EntityRecognizer for BrokenRecognizer {
        fn name(&self) -> &str {
            "broken"
        }

        async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, NlpError> {
            Err(NlpError::Unavailable {
                backend: "broken".into(),
                reason: "offline".into(),
            })
        }
    }

    #[tokio::test]
    async fn recognizer_failure_means_no_entities() {
        let findings = scan_entities(&BrokenRecognizer, ["Sam in London"]).await;
        assert_eq!(findings, EntityFindings::default());
    }
}
