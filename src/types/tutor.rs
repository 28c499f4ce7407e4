use crate::error::TutorError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    pub fn lower(self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topics offered in the sidebar. Free-form topics are accepted everywhere.
pub const TOPICS: [&str; 8] = [
    "Arithmetic",
    "Algebra",
    "Geometry",
    "Trigonometry",
    "Calculus",
    "Linear Algebra",
    "Statistics",
    "Number Theory",
];

/// Application areas for real-world scenarios.
pub const APPLICATION_AREAS: [&str; 5] = [
    "Finance",
    "Physics",
    "Engineering",
    "Computer Science",
    "Biology",
];

pub const SKILL_LEVELS: [SkillLevel; 4] = [
    SkillLevel::Beginner,
    SkillLevel::Intermediate,
    SkillLevel::Advanced,
    SkillLevel::Expert,
];

/// Canonical spelling of a known application area, matched case-insensitively.
pub fn application_area(area: &str) -> Option<&'static str> {
    let area = area.trim();
    APPLICATION_AREAS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(area))
}

/// Skill level plus topic, the context most features are asked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerContext {
    #[serde(default)]
    pub skill_level: SkillLevel,
    pub topic: String,
}

impl LearnerContext {
    /// Reject a blank topic and trim the one given.
    pub fn validated(mut self) -> Result<Self, TutorError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(TutorError::InvalidInput("topic must not be empty".to_string()));
        }
        self.topic = topic.to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_level_defaults_to_beginner() {
        let ctx: LearnerContext = serde_json::from_str(r#"{"topic":"Algebra"}"#).unwrap();
        assert_eq!(ctx.skill_level, SkillLevel::Beginner);
        assert_eq!(ctx.skill_level.lower(), "beginner");
    }

    #[test]
    fn application_areas_match_ignoring_case() {
        assert_eq!(application_area(" computer science "), Some("Computer Science"));
        assert_eq!(application_area("Astrology"), None);
    }

    #[test]
    fn blank_topic_is_rejected() {
        let ctx = LearnerContext {
            skill_level: SkillLevel::Expert,
            topic: "  ".to_string(),
        };
        assert!(matches!(ctx.validated(), Err(TutorError::InvalidInput(_))));
    }
}
