//! Rule tables that turn [`Signals`] into a [`Persona`].

use std::sync::LazyLock;

use serde::Serialize;

use crate::config::InferenceConfig;
use crate::persona::rules::RuleSet;
use crate::persona::{Persona, default_name};
use crate::reddit::RawActivity;
use crate::signals::lexicon::{
    ACADEMIC_SUBREDDITS, AR_VR_SUBREDDITS, CAREER_SUBREDDITS, SKILL_SUBREDDITS, TECH_SUBREDDITS,
    YOUTH_SUBREDDITS,
};
use crate::signals::{EngagementCounts, Signals, format_interests};

/// Everything the rule predicates look at.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaFacts {
    /// Surfaced interests, best first.
    pub top_subreddits: Vec<String>,
    pub karma: i64,
    /// Distinct subreddits the user was active in.
    pub subreddit_count: usize,
    pub tech_upvotes: i64,
    pub tech_activity: usize,
    pub engagement: EngagementCounts,
    #[serde(skip)]
    pub thresholds: InferenceConfig,
}

impl PersonaFacts {
    pub fn new(raw: &RawActivity, signals: &Signals, thresholds: &InferenceConfig) -> Self {
        Self {
            top_subreddits: signals
                .interests
                .iter()
                .map(|i| i.subreddit.clone())
                .collect(),
            karma: raw.karma,
            subreddit_count: signals.histogram.len(),
            tech_upvotes: signals.tech_upvotes,
            tech_activity: signals.histogram.tech_activity(),
            engagement: signals.engagement,
            thresholds: thresholds.clone(),
        }
    }

    fn any_in(&self, set: &[&str]) -> bool {
        self.top_subreddits.iter().any(|s| set.contains(&s.as_str()))
    }

    pub fn has_tech(&self) -> bool {
        self.any_in(TECH_SUBREDDITS)
    }

    /// Substring match, so related subreddits like "visionprodev" also count.
    pub fn has_ar_vr(&self) -> bool {
        self.top_subreddits
            .iter()
            .any(|s| AR_VR_SUBREDDITS.iter().any(|k| s.contains(k)))
    }

    pub fn has_academic(&self) -> bool {
        self.any_in(ACADEMIC_SUBREDDITS)
    }

    pub fn has_career(&self) -> bool {
        self.any_in(CAREER_SUBREDDITS)
    }

    pub fn has_youth(&self) -> bool {
        self.any_in(YOUTH_SUBREDDITS)
    }

    fn over_ratio(&self, count: usize) -> bool {
        count as f64 > self.thresholds.engagement_ratio * self.engagement.texts as f64
    }

    pub fn primary_interest(&self) -> &str {
        self.top_subreddits
            .first()
            .map_or("various topics", String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

static OCCUPATION: LazyLock<RuleSet<PersonaFacts, &'static str>> = LazyLock::new(|| {
    RuleSet::new("Reddit Enthusiast")
        .rule(
            40,
            "tech_professional",
            |f: &PersonaFacts| {
                f.has_tech()
                    && f.tech_upvotes > f.thresholds.tech_upvotes
                    && f.tech_activity > f.thresholds.tech_activity
            },
            "Tech Professional",
        )
        .rule(30, "tech_student", PersonaFacts::has_tech, "Computer Science Student")
        .rule(20, "academic", PersonaFacts::has_academic, "Graduate Student")
        .rule(10, "career", PersonaFacts::has_career, "Job Seeker")
});

static AGE_BRACKET: LazyLock<RuleSet<PersonaFacts, &'static str>> = LazyLock::new(|| {
    RuleSet::new("20–30 (estimated)")
        .rule(
            30,
            "youth",
            |f: &PersonaFacts| f.has_youth() && f.karma < f.thresholds.youth_karma,
            "18–24 (estimated)",
        )
        .rule(20, "academic", PersonaFacts::has_academic, "22–26 (estimated)")
        .rule(10, "career", PersonaFacts::has_career, "25–35 (estimated)")
});

static ENGAGEMENT: LazyLock<RuleSet<PersonaFacts, &'static str>> = LazyLock::new(|| {
    RuleSet::new("actively discusses topics")
        .rule(
            20,
            "insights",
            |f: &PersonaFacts| f.over_ratio(f.engagement.insights),
            "frequently shares insights",
        )
        .rule(
            10,
            "questions",
            |f: &PersonaFacts| f.over_ratio(f.engagement.questions),
            "often asks questions",
        )
});

static SKILLS: LazyLock<RuleSet<PersonaFacts, &'static str>> = LazyLock::new(|| {
    RuleSet::new("Unknown")
        .rule(
            20,
            "programming",
            |f: &PersonaFacts| f.has_tech() || f.any_in(SKILL_SUBREDDITS),
            "Python, JavaScript, Unity",
        )
        .rule(10, "academic", PersonaFacts::has_academic, "Python, R, SQL, data analysis")
});

/// Motivations, goals, frustrations and personality, chosen together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disposition {
    pub motivations: &'static str,
    pub goals: &'static str,
    pub frustrations: &'static str,
    pub personality: &'static str,
}

const COMMUNITY: Disposition = Disposition {
    motivations: "Seeks to connect and share knowledge in online communities.",
    goals: "Contribute meaningfully to discussions and stay updated on interests.",
    frustrations: "Navigating diverse online communities and managing information overload.",
    personality: "Engaged, curious, and community-oriented.",
};

const TECH: Disposition = Disposition {
    motivations: "Seeks to connect and share knowledge in tech communities.",
    goals: "Develop expertise in AR/VR and AI technologies.",
    frustrations: "Keeping up with rapid tech advancements and managing multiple discussions.",
    personality: "Curious, tech-savvy, and collaborative.",
};

const AR_VR: Disposition = Disposition {
    motivations: "Passionate about advancing AR/VR technology and sharing insights.",
    goals: "Build expertise in AR/VR development for innovative applications.",
    frustrations: "Keeping pace with fast-evolving AR/VR tech and community discussions.",
    personality: "Curious, innovative, and tech-enthusiastic.",
};

static DISPOSITION: LazyLock<RuleSet<PersonaFacts, Disposition>> = LazyLock::new(|| {
    RuleSet::new(COMMUNITY)
        .rule(20, "ar_vr", PersonaFacts::has_ar_vr, AR_VR)
        .rule(10, "tech", PersonaFacts::has_tech, TECH)
});

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the persona for `raw`. Missing users get the sentinel persona.
pub fn assemble(raw: &RawActivity, signals: &Signals, config: &InferenceConfig) -> Persona {
    if !raw.exists {
        return Persona::sentinel(&raw.handle);
    }

    let facts = PersonaFacts::new(raw, signals, config);
    let name = signals
        .display_name
        .clone()
        .unwrap_or_else(|| default_name(&raw.handle));
    let occupation = *OCCUPATION.evaluate(&facts);
    let age = match signals.age {
        Some(age) => format!("{age} (inferred)"),
        None => AGE_BRACKET.evaluate(&facts).to_string(),
    };
    let disposition = DISPOSITION.evaluate(&facts);
    let primary = facts.primary_interest();

    let about = about_text(&name, occupation, &facts, &signals.summary);
    tracing::debug!(handle = %raw.handle, facts = ?facts, occupation, "Persona rules evaluated");

    Persona {
        age,
        occupation: occupation.to_string(),
        place: signals.place.clone().unwrap_or_else(|| "Unknown".to_string()),
        status: "Unknown".to_string(),
        interests: format_interests(&signals.interests),
        about,
        motivations: disposition.motivations.to_string(),
        goals: disposition.goals.to_string(),
        behaviors: format!(
            "Participates in {} subreddits with {} total karma.",
            facts.subreddit_count, facts.karma
        ),
        habits: format!("Regularly posts and comments on Reddit, focusing on {primary}."),
        frustrations: disposition.frustrations.to_string(),
        skills: SKILLS.evaluate(&facts).to_string(),
        personality: disposition.personality.to_string(),
        sources: raw.source_urls(config.source_posts, config.source_comments),
        name,
    }
}

fn about_text(name: &str, occupation: &str, facts: &PersonaFacts, summary: &str) -> String {
    let tech = facts.has_tech();
    let (passion, explore, community) = if tech {
        ("AR/VR and AI technologies", "emerging tech trends", "tech")
    } else {
        ("diverse topics", "varied interests", "online")
    };
    format!(
        "{name} is a {} who actively engages in {} Reddit communities, with a strong focus on {}. \
         They {}, often sharing their passion for {passion}. {summary} Their posts and comments \
         reveal a curious mind, eager to explore {explore} and connect with others in {community} \
         communities.",
        occupation.to_lowercase(),
        facts.subreddit_count,
        facts.primary_interest(),
        ENGAGEMENT.evaluate(facts),
    )
}
