use crate::db::ProgressUpdate;
use crate::error::TutorError;
use crate::middleware::{SessionContext, TutorJson, TutorQuery};
use crate::router::AppState;
use crate::service::tutor::ImageSolution;
use crate::service::{SessionUpdate, SolveOutcome, VideoArtifacts};
use crate::types::LearnerContext;
use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    #[serde(flatten)]
    pub context: LearnerContext,
    pub problem: String,
}

/// POST /solve -> runs the four solve stages and keeps the result in the session.
pub async fn solve(
    State(state): State<AppState>,
    session: SessionContext,
    TutorJson(req): TutorJson<SolveRequest>,
) -> Result<Json<SolveOutcome>, TutorError> {
    let ctx = req.context.validated()?;
    info!(username = session.username(), topic = %ctx.topic, "solve requested");

    let outcome = state.solver.run(&ctx, &req.problem).await?;
    state
        .sessions
        .update(session.id, SessionUpdate::Solved(outcome.clone()))
        .await?;
    Ok(Json(outcome))
}

/// POST /solve/video -> renders, narrates and merges the last solution.
pub async fn video(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<VideoArtifacts>, TutorError> {
    let outcome = session
        .state
        .solve
        .ok_or(TutorError::MissingArtifact("solve a problem first"))?;

    let artifacts = state.video.run(&outcome.script, &outcome.narration).await?;
    state
        .sessions
        .update(
            session.id,
            SessionUpdate::VideoRendered {
                source: outcome,
                artifacts: artifacts.clone(),
            },
        )
        .await?;
    Ok(Json(artifacts))
}

/// POST /solve/image?skill_level=..&topic=.. with the raw image as body.
pub async fn image(
    State(state): State<AppState>,
    session: SessionContext,
    TutorQuery(ctx): TutorQuery<LearnerContext>,
    body: Bytes,
) -> Result<Json<ImageSolution>, TutorError> {
    let ctx = ctx.validated()?;
    let solved = state
        .tutor
        .solve_image(&state.solver, &state.ocr, &ctx, &body)
        .await?;
    state
        .users
        .update_progress(session.username(), ProgressUpdate::topic(&ctx.topic))
        .await?;
    Ok(Json(solved))
}
