//! Static word lists and subreddit tables used by extraction and persona rules.
//!
//! Everything here is lower-case; callers lower-case before comparing.

/// Broad subreddits that never surface as interests on their own.
pub const GENERAL_SUBREDDITS: &[&str] = &["askreddit", "pics", "videos", "funny"];

/// Technology subreddits. Always eligible as interests and ranked first.
pub const TECH_SUBREDDITS: &[&str] = &[
    "programming",
    "chatgpt",
    "aivideo",
    "visionpro",
    "visionosdev",
    "datascience",
];

/// Subreddits that signal an AR/VR focus.
pub const AR_VR_SUBREDDITS: &[&str] = &["visionpro", "visionosdev"];

pub const YOUTH_SUBREDDITS: &[&str] = &[
    "teenagers",
    "genz",
    "visionpro",
    "visionosdev",
    "civ5",
    "manorlords",
];

pub const ACADEMIC_SUBREDDITS: &[&str] = &["studying", "university", "college"];

pub const CAREER_SUBREDDITS: &[&str] = &["jobs", "careerguidance"];

/// Language and engine subreddits that imply programming skills.
pub const SKILL_SUBREDDITS: &[&str] = &["python", "javascript", "unity"];

/// Phrases that disqualify a text from the summary input and are scrubbed
/// from summarizer output.
pub const NOISE_PHRASES: &[&str] = &[
    "tiktok",
    "h1b",
    "adventurous city",
    "intern season",
    "new york city is equally",
    "transient being",
    "wrong party",
    "three years",
    "nightlife",
    "orgy dome",
    "social media",
    "neighborhood",
];

/// Keywords counted (substring, once each) to decide whether a sentence is tech talk.
pub const TECH_KEYWORDS: &[&str] = &[
    "ar",
    "vr",
    "ai",
    "vision pro",
    "technology",
    "tech",
    "augmented reality",
    "virtual reality",
    "chatgpt",
    "visionosdev",
    "aivideo",
];

/// Words marking a text as sharing advice or insight.
pub const INSIGHT_KEYWORDS: &[&str] = &["suggest", "recommend", "solution", "idea"];

/// Subreddit to display location, in lookup order.
pub const LOCATIONS: &[(&str, &str)] = &[
    ("newyorkcity", "New York City, NY"),
    ("asknyc", "New York City, NY"),
    ("trier", "Trier, Germany"),
    ("germany", "Germany"),
    ("london", "London, UK"),
    ("sanfrancisco", "San Francisco, CA"),
    ("boston", "Boston, MA"),
    ("toronto", "Toronto, Canada"),
    ("california", "California, USA"),
];

/// NYC subreddits; a small share is enough to place the user.
pub const PRIORITY_CITY_SUBREDDITS: &[&str] = &["newyorkcity", "asknyc"];

/// City subreddits that need a majority share.
pub const CITY_SUBREDDITS: &[&str] = &["sanfrancisco", "boston", "toronto", "london", "trier"];

pub const STATE_SUBREDDIT: &str = "california";

/// Capitalized words the recognizer tends to mislabel as people.
pub const NAME_BLOCKLIST: &[&str] = &[
    "also",
    "confident",
    "this",
    "that",
    "sure",
    "really",
    "very",
    "pretty",
    "super",
    "totally",
    "bleecker",
    "broadway",
    "manhattan",
];

/// A PERSON entity must contain one of these to be used as a display name.
pub const COMMON_NAMES: &[&str] = &[
    "jay", "alex", "sam", "chris", "patel", "kim", "lee", "emma", "david", "sarah", "michael",
    "jessica", "daniel", "laura",
];

pub fn is_tech(subreddit: &str) -> bool {
    TECH_SUBREDDITS.contains(&subreddit)
}

pub fn is_general(subreddit: &str) -> bool {
    GENERAL_SUBREDDITS.contains(&subreddit)
}

/// Display location for a subreddit, if it has one.
pub fn location_of(subreddit: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|(name, _)| *name == subreddit)
        .map(|(_, place)| *place)
}

/// Mentions lower-case-contained in `text`, counting each keyword once.
pub fn keyword_hits(text_lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text_lower.contains(*k)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_lookup() {
        assert_eq!(location_of("asknyc"), Some("New York City, NY"));
        assert_eq!(location_of("rust"), None);
    }

    #[test]
    fn keywords_counted_once_each() {
        assert_eq!(keyword_hits("ai ai ai", TECH_KEYWORDS), 1);
        // "tech" and "technology" both hit; "ar" hits inside "hardware".
        assert_eq!(keyword_hits("technology hardware", TECH_KEYWORDS), 3);
    }

    #[test]
    fn every_city_subreddit_has_a_location() {
        for name in PRIORITY_CITY_SUBREDDITS
            .iter()
            .chain(CITY_SUBREDDITS)
            .chain(std::iter::once(&STATE_SUBREDDIT))
        {
            assert!(location_of(name).is_some(), "{name} has no location");
        }
    }
}
