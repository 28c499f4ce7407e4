use crate::db::Progress;
use crate::error::TutorError;
use crate::middleware::SessionContext;
use crate::router::AppState;
use crate::service::PerformanceSummary;
use axum::{Json, extract::State};

/// GET /progress -> the stored progress document.
pub async fn progress(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Progress>, TutorError> {
    Ok(Json(state.users.get_progress(session.username()).await?))
}

/// GET /analytics -> dashboard summary derived from progress.
pub async fn analytics(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<PerformanceSummary>, TutorError> {
    let progress = state.users.get_progress(session.username()).await?;
    Ok(Json(PerformanceSummary::from_progress(&progress)))
}
