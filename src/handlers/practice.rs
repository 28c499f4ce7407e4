use crate::db::ProgressUpdate;
use crate::error::TutorError;
use crate::extract::PracticeItem;
use crate::middleware::{SessionContext, TutorJson};
use crate::router::AppState;
use crate::service::SessionUpdate;
use crate::service::session_actor::PracticeSession;
use crate::types::LearnerContext;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// POST /practice -> a fresh practice set for the topic.
pub async fn generate(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(ctx): TutorJson<LearnerContext>,
) -> Result<Json<PracticeSession>, TutorError> {
    let ctx = ctx.validated()?;
    let items = state.tutor.practice_set(&ctx).await?;
    let practice = PracticeSession {
        topic: ctx.topic,
        items,
    };
    state
        .sessions
        .update(
            session.id,
            SessionUpdate::PracticeGenerated {
                topic: practice.topic.clone(),
                items: practice.items.clone(),
            },
        )
        .await?;
    Ok(Json(practice))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// Zero-based position in the current practice set.
    pub index: usize,
    pub solution: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackReply {
    pub correct_solution: String,
    pub feedback: String,
}

/// POST /practice/feedback -> compares the learner's attempt with the stored solution.
pub async fn feedback(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<FeedbackRequest>,
) -> Result<Json<FeedbackReply>, TutorError> {
    let item = practice_item(&session, req.index)?;
    let feedback = state
        .tutor
        .practice_feedback(&item.solution, &req.solution)
        .await?;
    Ok(Json(FeedbackReply {
        correct_solution: item.solution.clone(),
        feedback,
    }))
}

/// POST /practice/save -> records the current set's questions under its topic.
pub async fn save(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<StatusCode, TutorError> {
    let practice = session
        .state
        .practice
        .as_ref()
        .ok_or(TutorError::MissingArtifact("practice set"))?;
    let questions = practice.items.iter().map(|i| i.question.clone()).collect();
    state
        .users
        .update_progress(
            session.username(),
            ProgressUpdate::topic(&practice.topic).with_practice_set(questions),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn practice_item(session: &SessionContext, index: usize) -> Result<&PracticeItem, TutorError> {
    let practice = session
        .state
        .practice
        .as_ref()
        .ok_or(TutorError::MissingArtifact("practice set"))?;
    practice
        .items
        .get(index)
        .ok_or_else(|| TutorError::InvalidInput(format!("practice set has no question {}", index + 1)))
}
