use super::TextReply;
use crate::db::ProgressUpdate;
use crate::error::TutorError;
use crate::middleware::{SessionContext, TutorJson};
use crate::router::AppState;
use crate::service::SessionUpdate;
use crate::service::tutor::{HistoryNote, Scenario};
use crate::types::{LearnerContext, SkillLevel};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConceptRequest {
    #[serde(default)]
    pub skill_level: SkillLevel,
    pub concept: String,
}

/// POST /concept -> explains a concept and marks it explored.
pub async fn concept(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<ConceptRequest>,
) -> Result<Json<TextReply>, TutorError> {
    let text = state.tutor.concept(req.skill_level, &req.concept).await?;
    state
        .users
        .update_progress(session.username(), ProgressUpdate::topic(req.concept.trim()))
        .await?;
    Ok(Json(text.into()))
}

#[derive(Debug, Deserialize)]
pub struct FormulaRequest {
    #[serde(default)]
    pub skill_level: SkillLevel,
    pub topic: String,
}

/// POST /formulas -> formula sheet for a topic, marked explored.
pub async fn formulas(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<FormulaRequest>,
) -> Result<Json<TextReply>, TutorError> {
    let text = state.tutor.formulas(req.skill_level, &req.topic).await?;
    state
        .users
        .update_progress(session.username(), ProgressUpdate::topic(req.topic.trim()))
        .await?;
    Ok(Json(text.into()))
}

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

/// POST /videos -> lecture recommendations.
pub async fn videos(
    State(state): State<AppState>,
    _session: SessionContext,
    TutorJson(req): TutorJson<TopicRequest>,
) -> Result<Json<TextReply>, TutorError> {
    Ok(Json(state.tutor.video_recommendations(&req.topic).await?.into()))
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    pub subject: String,
}

/// POST /history -> historical context and a fun fact.
pub async fn history(
    State(state): State<AppState>,
    _session: SessionContext,
    TutorJson(req): TutorJson<HistoryRequest>,
) -> Result<Json<HistoryNote>, TutorError> {
    Ok(Json(state.tutor.history(&req.subject).await?))
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    #[serde(flatten)]
    pub context: LearnerContext,
    pub area: String,
}

/// POST /applications -> real-world scenario with questions and a worked example.
pub async fn applications(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<ScenarioRequest>,
) -> Result<Json<Scenario>, TutorError> {
    let ctx = req.context.validated()?;
    let scenario = state.tutor.scenario(&ctx, &req.area).await?;
    state
        .sessions
        .update(session.id, SessionUpdate::ScenarioGenerated(scenario.clone()))
        .await?;
    Ok(Json(scenario))
}

/// DELETE /applications -> forgets the current scenario.
pub async fn clear_applications(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<StatusCode, TutorError> {
    state
        .sessions
        .update(session.id, SessionUpdate::ScenarioCleared)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    #[serde(default)]
    pub skill_level: SkillLevel,
    pub goal: String,
    pub hours_per_week: u8,
}

/// POST /study-plan -> week-by-week plan with markdown week headings.
pub async fn study_plan(
    State(state): State<AppState>,
    _session: SessionContext,
    TutorJson(req): TutorJson<StudyPlanRequest>,
) -> Result<Json<TextReply>, TutorError> {
    let plan = state
        .tutor
        .study_plan(req.skill_level, &req.goal, req.hours_per_week)
        .await?;
    Ok(Json(plan.into()))
}
