//! Validators for the free-form text the generative services return.
//!
//! Every format here is a convention asked for in the prompt, not a contract:
//! any deviation surfaces as an `ExtractError` so the caller can ask the user
//! to regenerate.

pub mod marker;
pub mod practice;
pub mod quiz;
pub mod script;

use thiserror::Error;

pub use marker::{NARRATION_PLACEHOLDER, ScriptSections, VOICEOVER_MARKER, split_on_marker};
pub use practice::{PracticeItem, extract_practice_items};
pub use quiz::{QUIZ_LENGTH, QuizItem, extract_quiz_items};
pub use script::clean_animation_script;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no question/solution pairs found")]
    NoPracticeItems,

    #[error("expected {expected} questions, but found {found}")]
    CountMismatch { expected: usize, found: usize },
}
