//! Persona record and assembly from extracted signals.

mod assemble;
pub mod rules;

pub use assemble::{PersonaFacts, assemble};

use serde::{Deserialize, Serialize};

use crate::util::capitalize;

const UNKNOWN: &str = "Unknown";

/// Inferred profile of a Reddit user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub age: String,
    pub occupation: String,
    pub place: String,
    pub status: String,
    pub interests: String,
    pub about: String,
    pub motivations: String,
    pub goals: String,
    pub behaviors: String,
    pub habits: String,
    pub frustrations: String,
    pub skills: String,
    pub personality: String,
    /// Citation URLs, at most one per cited post or comment.
    pub sources: Vec<String>,
}

impl Persona {
    /// Persona for a handle with no usable data.
    pub fn sentinel(handle: &str) -> Self {
        let unknown = || UNKNOWN.to_string();
        Self {
            name: default_name(handle),
            age: unknown(),
            occupation: unknown(),
            place: unknown(),
            status: unknown(),
            interests: unknown(),
            about: format!("No data available for u/{handle}."),
            motivations: unknown(),
            goals: unknown(),
            behaviors: unknown(),
            habits: unknown(),
            frustrations: unknown(),
            skills: unknown(),
            personality: unknown(),
            sources: Vec::new(),
        }
    }

    /// Labelled fields in display order.
    pub fn fields(&self) -> [(&'static str, &str); 14] {
        [
            ("Name", self.name.as_str()),
            ("Age", self.age.as_str()),
            ("Occupation", self.occupation.as_str()),
            ("Place", self.place.as_str()),
            ("Status", self.status.as_str()),
            ("Interests", self.interests.as_str()),
            ("About", self.about.as_str()),
            ("Motivations", self.motivations.as_str()),
            ("Goals", self.goals.as_str()),
            ("Behaviors", self.behaviors.as_str()),
            ("Habits", self.habits.as_str()),
            ("Frustrations", self.frustrations.as_str()),
            ("Skills", self.skills.as_str()),
            ("Personality", self.personality.as_str()),
        ]
    }
}

/// Name used until an entity scan finds a better one.
pub fn default_name(handle: &str) -> String {
    format!("{} User", capitalize(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_fields() {
        let p = Persona::sentinel("hungry-MOVE");
        assert_eq!(p.name, "Hungry-move User");
        assert_eq!(p.about, "No data available for u/hungry-MOVE.");
        assert!(p.sources.is_empty());
        for (label, value) in p.fields() {
            if label != "Name" && label != "About" {
                assert_eq!(value, "Unknown", "{label}");
            }
        }
    }

    #[test]
    fn fields_follow_declaration_order() {
        let labels: Vec<_> = Persona::sentinel("x").fields().map(|(l, _)| l).to_vec();
        assert_eq!(labels.first(), Some(&"Name"));
        assert_eq!(labels.last(), Some(&"Personality"));
        assert_eq!(labels.len(), 14);
    }
}
