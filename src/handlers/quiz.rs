use crate::db::ProgressUpdate;
use crate::error::TutorError;
use crate::middleware::{SessionContext, TutorJson};
use crate::router::AppState;
use crate::service::{SessionState, SessionUpdate};
use crate::service::session_actor::QuizAttempt;
use crate::types::LearnerContext;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A quiz as the learner sees it: no correct letters, no explanations.
#[derive(Debug, Serialize)]
pub struct QuizView {
    pub topic: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
}

impl From<&QuizAttempt> for QuizView {
    fn from(quiz: &QuizAttempt) -> Self {
        Self {
            topic: quiz.topic.clone(),
            questions: quiz
                .items
                .iter()
                .zip(&quiz.answers)
                .map(|(item, answer)| QuestionView {
                    question: item.question.clone(),
                    options: item.options.clone(),
                    selected: answer.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub topic: String,
    pub score: f64,
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Serialize)]
pub struct QuestionResult {
    pub selected: Option<String>,
    pub correct: bool,
    pub correct_answer: char,
    /// Only revealed for answered questions.
    pub explanation: Option<String>,
}

impl From<&QuizAttempt> for QuizResult {
    fn from(quiz: &QuizAttempt) -> Self {
        let questions = quiz
            .items
            .iter()
            .zip(&quiz.answers)
            .map(|(item, answer)| QuestionResult {
                selected: answer.clone(),
                correct: answer.as_deref().is_some_and(|a| item.is_correct(a)),
                correct_answer: item.correct,
                explanation: answer.as_ref().map(|_| item.explanation.clone()),
            })
            .collect();
        Self {
            topic: quiz.topic.clone(),
            score: quiz.score(),
            questions,
        }
    }
}

fn current_quiz(state: &SessionState) -> Result<&QuizAttempt, TutorError> {
    state.quiz.as_ref().ok_or(TutorError::MissingArtifact("quiz"))
}

/// POST /quiz -> generates a new quiz, replacing the current one.
pub async fn generate(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(ctx): TutorJson<LearnerContext>,
) -> Result<Json<QuizView>, TutorError> {
    let ctx = ctx.validated()?;
    let items = state.tutor.quiz(&ctx).await?;
    let updated = state
        .sessions
        .update(
            session.id,
            SessionUpdate::QuizGenerated {
                topic: ctx.topic,
                items,
            },
        )
        .await?;
    Ok(Json(QuizView::from(current_quiz(&updated)?)))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Zero-based question index.
    pub index: usize,
    /// The chosen option, e.g. `"B) 12"` or just `"B"`.
    pub answer: String,
}

/// POST /quiz/answer -> records the selected option for one question.
pub async fn answer(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<AnswerRequest>,
) -> Result<Json<QuizView>, TutorError> {
    let updated = state
        .sessions
        .update(
            session.id,
            SessionUpdate::QuizAnswered {
                index: req.index,
                answer: req.answer,
            },
        )
        .await?;
    Ok(Json(QuizView::from(current_quiz(&updated)?)))
}

/// POST /quiz/submit -> scores the quiz and stores the score under its topic.
pub async fn submit(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<QuizResult>, TutorError> {
    let result = QuizResult::from(current_quiz(&session.state)?);
    state
        .users
        .update_progress(
            session.username(),
            ProgressUpdate::topic(&result.topic).with_score(result.score),
        )
        .await?;
    info!(
        username = session.username(),
        topic = %result.topic,
        score = result.score,
        "quiz submitted"
    );
    Ok(Json(result))
}

/// POST /quiz/retake -> clears the answers, keeps the questions.
pub async fn retake(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<QuizView>, TutorError> {
    let updated = state
        .sessions
        .update(session.id, SessionUpdate::QuizRetake)
        .await?;
    Ok(Json(QuizView::from(current_quiz(&updated)?)))
}
