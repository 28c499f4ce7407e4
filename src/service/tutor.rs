use crate::api::TextGenerator;
use crate::error::TutorError;
use crate::extract::{PracticeItem, QUIZ_LENGTH, QuizItem, extract_practice_items, extract_quiz_items};
use crate::media::{TesseractOcr, sniff_image_mime};
use crate::service::pipeline::SolvePipeline;
use crate::service::prompts;
use crate::types::gemini::Part;
use crate::types::{APPLICATION_AREAS, LearnerContext, SkillLevel, application_area};
use base64::Engine;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{info, warn};

pub const PRACTICE_SET_SIZE: usize = 10;
pub const STUDY_HOURS: RangeInclusive<u8> = 1..=40;
const QUESTIONS_FALLBACK: &str = "Failed to retrieve practice questions. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryNote {
    pub context: String,
    pub fun_fact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub area: String,
    pub scenario: String,
    pub questions: String,
    pub sample_solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSolution {
    /// Text read off the image; `None` when the image went to the model directly.
    pub extracted_text: Option<String>,
    pub solution: String,
}

/// One-prompt features on top of the generative text API.
#[derive(Clone)]
pub struct TutorService {
    generator: Arc<dyn TextGenerator>,
}

impl TutorService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn practice_set(&self, ctx: &LearnerContext) -> Result<Vec<PracticeItem>, TutorError> {
        let text = self
            .generator
            .generate(&prompts::practice_set(ctx.skill_level, &ctx.topic, PRACTICE_SET_SIZE))
            .await?;
        let items = extract_practice_items(&text)?;
        info!(topic = %ctx.topic, count = items.len(), "practice set generated");
        Ok(items)
    }

    pub async fn practice_feedback(&self, correct: &str, attempt: &str) -> Result<String, TutorError> {
        let attempt = non_blank(attempt, "solution")?;
        self.generator
            .generate(&prompts::practice_feedback(correct, attempt))
            .await
    }

    pub async fn concept(&self, skill: SkillLevel, concept: &str) -> Result<String, TutorError> {
        let concept = non_blank(concept, "concept")?;
        self.generator.generate(&prompts::concept(skill, concept)).await
    }

    pub async fn formulas(&self, skill: SkillLevel, topic: &str) -> Result<String, TutorError> {
        let topic = non_blank(topic, "topic")?;
        self.generator.generate(&prompts::formulas(skill, topic)).await
    }

    pub async fn quiz(&self, ctx: &LearnerContext) -> Result<Vec<QuizItem>, TutorError> {
        let text = self
            .generator
            .generate(&prompts::quiz(ctx.skill_level, &ctx.topic, QUIZ_LENGTH))
            .await?;
        let items = extract_quiz_items(text.trim())?;
        info!(topic = %ctx.topic, "quiz generated");
        Ok(items)
    }

    pub async fn video_recommendations(&self, topic: &str) -> Result<String, TutorError> {
        let topic = non_blank(topic, "topic")?;
        self.generator.generate(&prompts::video_recommendations(topic)).await
    }

    /// Historical context plus a fun fact. A failed fun fact is logged and
    /// left out.
    pub async fn history(&self, subject: &str) -> Result<HistoryNote, TutorError> {
        let subject = non_blank(subject, "subject")?;
        let context = self.generator.generate(&prompts::history(subject)).await?;
        let fun_fact = match self.generator.generate(&prompts::fun_fact(subject)).await {
            Ok(fact) => Some(fact),
            Err(e) => {
                warn!(subject, error = %e, "fun fact generation failed");
                None
            }
        };
        Ok(HistoryNote { context, fun_fact })
    }

    /// Scenario, three questions on it and one worked example, generated in
    /// that order. A failed question prompt degrades to a placeholder.
    pub async fn scenario(&self, ctx: &LearnerContext, area: &str) -> Result<Scenario, TutorError> {
        let area = non_blank(area, "application area")?;
        let area = application_area(area).ok_or_else(|| {
            TutorError::InvalidInput(format!(
                "unknown application area; choose one of {}",
                APPLICATION_AREAS.join(", ")
            ))
        })?;
        let scenario = self
            .generator
            .generate(&prompts::scenario(ctx.skill_level, &ctx.topic, area))
            .await?;

        let questions = match self
            .generator
            .generate(&prompts::scenario_questions(&scenario))
            .await
        {
            Ok(q) => q,
            Err(e) => {
                warn!(area, error = %e, "scenario questions failed");
                QUESTIONS_FALLBACK.to_string()
            }
        };
        let sample_solution = self
            .generator
            .generate(&prompts::scenario_sample_solution(&scenario))
            .await?;

        info!(topic = %ctx.topic, area, "scenario generated");
        Ok(Scenario {
            area: area.to_string(),
            scenario,
            questions,
            sample_solution,
        })
    }

    pub async fn study_plan(
        &self,
        skill: SkillLevel,
        goal: &str,
        hours_per_week: u8,
    ) -> Result<String, TutorError> {
        let goal = non_blank(goal, "study goal")?;
        if !STUDY_HOURS.contains(&hours_per_week) {
            return Err(TutorError::InvalidInput(format!(
                "hours per week must be between {} and {}",
                STUDY_HOURS.start(),
                STUDY_HOURS.end()
            )));
        }
        let plan = self
            .generator
            .generate(&prompts::study_plan(skill, goal, hours_per_week))
            .await?;
        Ok(format_study_plan(&plan))
    }

    /// OCR the upload and solve the recognized text. When OCR finds nothing
    /// legible the image itself is sent to the model.
    pub async fn solve_image(
        &self,
        solver: &SolvePipeline,
        ocr: &TesseractOcr,
        ctx: &LearnerContext,
        image: &[u8],
    ) -> Result<ImageSolution, TutorError> {
        if image.is_empty() {
            return Err(TutorError::InvalidInput("image must not be empty".to_string()));
        }

        let recognized = match ocr.recognize(image).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "ocr failed; falling back to inline image");
                String::new()
            }
        };
        if !recognized.is_empty() {
            let solution = solver.solve(ctx, &recognized).await?;
            return Ok(ImageSolution {
                extracted_text: Some(recognized),
                solution,
            });
        }

        let mime = sniff_image_mime(image).ok_or_else(|| {
            TutorError::InvalidInput("unsupported image format; upload a JPG or PNG".to_string())
        })?;
        let data = base64::engine::general_purpose::STANDARD.encode(image);
        let parts = vec![
            Part::inline(mime, data),
            Part::text(prompts::solve(
                ctx.skill_level,
                &ctx.topic,
                "the handwritten problem in this image",
            )),
        ];
        let solution = self.generator.generate_parts(parts).await?;
        Ok(ImageSolution {
            extracted_text: None,
            solution,
        })
    }
}

/// Promote each `Week ` to a level-3 heading.
pub fn format_study_plan(plan: &str) -> String {
    plan.replace("Week ", "### Week ")
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, TutorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TutorError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
