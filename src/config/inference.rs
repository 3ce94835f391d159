use crate::config::helpers::{check_ratio, parse_optional_env};
use crate::error::ConfigError;

/// Thresholds used by signal extraction and persona rules.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Minimum share of total activity for a non-tech subreddit to count as an interest.
    pub interest_share: f64,
    /// How many interests are surfaced.
    pub max_interests: usize,
    /// Upvotes on tech posts needed (strictly more) for "Tech Professional".
    pub tech_upvotes: i64,
    /// Tech activity needed (strictly more) for "Tech Professional".
    pub tech_activity: usize,
    /// Karma ceiling (exclusive) for the youngest age bracket.
    pub youth_karma: i64,
    /// Share of texts that must be questions/insights to set the engagement style.
    pub engagement_ratio: f64,
    /// Share needed by a prioritized NYC subreddit to set the place.
    pub nyc_share: f64,
    /// Share needed by a city subreddit to set the place.
    pub city_share: f64,
    /// Share needed by a state subreddit to set the place.
    pub state_share: f64,
    /// Cap on characters sent to the summarizer.
    pub summary_chars: usize,
    pub summary_min: u32,
    pub summary_max: u32,
    /// Posts cited as sources.
    pub source_posts: usize,
    /// Comments cited as sources.
    pub source_comments: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            interest_share: 0.05,
            max_interests: 5,
            tech_upvotes: 150,
            tech_activity: 20,
            youth_karma: 5000,
            engagement_ratio: 0.3,
            nyc_share: 0.05,
            city_share: 0.5,
            state_share: 0.7,
            summary_chars: 200,
            summary_min: 10,
            summary_max: 50,
            source_posts: 2,
            source_comments: 2,
        }
    }
}

impl InferenceConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let d = Self::default();

        let interest_share = check_ratio(
            "PERSONA_INTEREST_SHARE",
            parse_optional_env("PERSONA_INTEREST_SHARE", d.interest_share)?,
        )?;
        let engagement_ratio = check_ratio(
            "PERSONA_ENGAGEMENT_RATIO",
            parse_optional_env("PERSONA_ENGAGEMENT_RATIO", d.engagement_ratio)?,
        )?;
        let nyc_share = check_ratio(
            "PERSONA_NYC_SHARE",
            parse_optional_env("PERSONA_NYC_SHARE", d.nyc_share)?,
        )?;
        let city_share = check_ratio(
            "PERSONA_CITY_SHARE",
            parse_optional_env("PERSONA_CITY_SHARE", d.city_share)?,
        )?;
        let state_share = check_ratio(
            "PERSONA_STATE_SHARE",
            parse_optional_env("PERSONA_STATE_SHARE", d.state_share)?,
        )?;

        let max_interests = parse_optional_env("PERSONA_MAX_INTERESTS", d.max_interests)?;
        if max_interests == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PERSONA_MAX_INTERESTS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let summary_min = parse_optional_env("PERSONA_SUMMARY_MIN", d.summary_min)?;
        let summary_max = parse_optional_env("PERSONA_SUMMARY_MAX", d.summary_max)?;
        if summary_min > summary_max {
            return Err(ConfigError::InvalidValue {
                key: "PERSONA_SUMMARY_MIN".to_string(),
                message: format!("must not exceed PERSONA_SUMMARY_MAX ({summary_max})"),
            });
        }

        Ok(Self {
            interest_share,
            max_interests,
            tech_upvotes: parse_optional_env("PERSONA_TECH_UPVOTES", d.tech_upvotes)?,
            tech_activity: parse_optional_env("PERSONA_TECH_ACTIVITY", d.tech_activity)?,
            youth_karma: parse_optional_env("PERSONA_YOUTH_KARMA", d.youth_karma)?,
            engagement_ratio,
            nyc_share,
            city_share,
            state_share,
            summary_chars: parse_optional_env("PERSONA_SUMMARY_CHARS", d.summary_chars)?,
            summary_min,
            summary_max,
            source_posts: parse_optional_env("PERSONA_SOURCE_POSTS", d.source_posts)?,
            source_comments: parse_optional_env("PERSONA_SOURCE_COMMENTS", d.source_comments)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::helpers::ENV_MUTEX;

    const KEYS: &[&str] = &[
        "PERSONA_INTEREST_SHARE",
        "PERSONA_MAX_INTERESTS",
        "PERSONA_TECH_UPVOTES",
        "PERSONA_TECH_ACTIVITY",
        "PERSONA_YOUTH_KARMA",
        "PERSONA_ENGAGEMENT_RATIO",
        "PERSONA_NYC_SHARE",
        "PERSONA_CITY_SHARE",
        "PERSONA_STATE_SHARE",
        "PERSONA_SUMMARY_CHARS",
        "PERSONA_SUMMARY_MIN",
        "PERSONA_SUMMARY_MAX",
        "PERSONA_SOURCE_POSTS",
        "PERSONA_SOURCE_COMMENTS",
    ];

    fn clear_inference_env() {
        // SAFETY: Only called under ENV_MUTEX in tests.
        for key in KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn defaults_when_no_env() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        clear_inference_env();

        let config = InferenceConfig::resolve().expect("should resolve");
        assert_eq!(config, InferenceConfig::default());
        assert_eq!(config.tech_upvotes, 150);
        assert_eq!(config.summary_chars, 200);
    }

    #[test]
    fn env_overrides() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        clear_inference_env();
        unsafe {
            std::env::set_var("PERSONA_INTEREST_SHARE", "0.1");
            std::env::set_var("PERSONA_TECH_UPVOTES", "500");
            std::env::set_var("PERSONA_MAX_INTERESTS", "3");
        }

        let config = InferenceConfig::resolve().expect("should resolve");
        assert!((config.interest_share - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.tech_upvotes, 500);
        assert_eq!(config.max_interests, 3);

        clear_inference_env();
    }

    #[test]
    fn rejects_share_above_one() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        clear_inference_env();
        unsafe { std::env::set_var("PERSONA_CITY_SHARE", "2.5") };

        let err = InferenceConfig::resolve().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PERSONA_CITY_SHARE"));

        clear_inference_env();
    }

    #[test]
    fn rejects_zero_interests() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        clear_inference_env();
        unsafe { std::env::set_var("PERSONA_MAX_INTERESTS", "0") };

        assert!(InferenceConfig::resolve().is_err());

        clear_inference_env();
    }
}
