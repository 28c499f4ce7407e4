pub mod gemini;
pub mod openrouter;
pub mod tutor;

pub use tutor::{
    APPLICATION_AREAS, LearnerContext, SKILL_LEVELS, SkillLevel, TOPICS, application_area,
};
