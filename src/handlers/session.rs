use super::quiz::QuizView;
use crate::middleware::SessionContext;
use crate::service::session_actor::PracticeSession;
use crate::service::tutor::Scenario;
use crate::service::{SolveOutcome, VideoArtifacts};
use crate::types::{APPLICATION_AREAS, SKILL_LEVELS, SkillLevel, TOPICS};
use axum::Json;
use serde::Serialize;

/// Choices a client offers before the first request.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub skill_levels: [SkillLevel; 4],
    pub topics: [&'static str; 8],
    pub application_areas: [&'static str; 5],
}

/// GET /catalog -> skill levels, suggested topics and application areas.
pub async fn catalog() -> Json<Catalog> {
    Json(Catalog {
        skill_levels: SKILL_LEVELS,
        topics: TOPICS,
        application_areas: APPLICATION_AREAS,
    })
}

/// What the learner is currently working on. Quiz answers stay hidden.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub username: String,
    pub quiz: Option<QuizView>,
    pub practice: Option<PracticeSession>,
    pub scenario: Option<Scenario>,
    pub solve: Option<SolveOutcome>,
    pub video: Option<VideoArtifacts>,
}

impl From<SessionContext> for SessionView {
    fn from(session: SessionContext) -> Self {
        let state = session.state;
        Self {
            quiz: state.quiz.as_ref().map(QuizView::from),
            username: state.username,
            practice: state.practice,
            scenario: state.scenario,
            solve: state.solve,
            video: state.video,
        }
    }
}

/// GET /session -> snapshot of the caller's session.
pub async fn snapshot(session: SessionContext) -> Json<SessionView> {
    Json(SessionView::from(session))
}
