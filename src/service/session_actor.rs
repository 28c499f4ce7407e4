use crate::error::TutorError;
use crate::extract::quiz::score;
use crate::extract::{PracticeItem, QuizItem};
use crate::service::pipeline::{SolveOutcome, VideoArtifacts};
use crate::service::tutor::Scenario;
use ractor::concurrency::JoinHandle;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

pub type SessionId = Uuid;

const SWEEP_EVERY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizAttempt {
    pub topic: String,
    pub items: Vec<QuizItem>,
    /// One slot per item; `None` until answered.
    pub answers: Vec<Option<String>>,
}

impl QuizAttempt {
    pub fn new(topic: String, items: Vec<QuizItem>) -> Self {
        let answers = vec![None; items.len()];
        Self {
            topic,
            items,
            answers,
        }
    }

    pub fn score(&self) -> f64 {
        score(&self.items, &self.answers)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeSession {
    pub topic: String,
    pub items: Vec<PracticeItem>,
}

/// Per-login working state. Nothing here outlives the session.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionState {
    pub username: String,
    pub quiz: Option<QuizAttempt>,
    pub practice: Option<PracticeSession>,
    pub scenario: Option<Scenario>,
    pub solve: Option<SolveOutcome>,
    pub video: Option<VideoArtifacts>,
}

#[derive(Debug)]
pub enum SessionUpdate {
    QuizGenerated { topic: String, items: Vec<QuizItem> },
    QuizAnswered { index: usize, answer: String },
    /// Clear every selected answer and keep the questions.
    QuizRetake,
    PracticeGenerated { topic: String, items: Vec<PracticeItem> },
    ScenarioGenerated(Scenario),
    ScenarioCleared,
    /// A new solution invalidates any video rendered for the previous one.
    Solved(SolveOutcome),
    /// Stored only while `source` is still the session's current solution.
    VideoRendered {
        source: SolveOutcome,
        artifacts: VideoArtifacts,
    },
}

impl SessionState {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, update: SessionUpdate) -> Result<(), TutorError> {
        match update {
            SessionUpdate::QuizGenerated { topic, items } => {
                self.quiz = Some(QuizAttempt::new(topic, items));
            }
            SessionUpdate::QuizAnswered { index, answer } => {
                let quiz = self.quiz.as_mut().ok_or(TutorError::MissingArtifact("quiz"))?;
                let slot = quiz.answers.get_mut(index).ok_or_else(|| {
                    TutorError::InvalidInput(format!("quiz has no question {}", index + 1))
                })?;
                *slot = Some(answer);
            }
            SessionUpdate::QuizRetake => {
                let quiz = self.quiz.as_mut().ok_or(TutorError::MissingArtifact("quiz"))?;
                quiz.answers.iter_mut().for_each(|a| *a = None);
            }
            SessionUpdate::PracticeGenerated { topic, items } => {
                self.practice = Some(PracticeSession { topic, items });
            }
            SessionUpdate::ScenarioGenerated(scenario) => self.scenario = Some(scenario),
            SessionUpdate::ScenarioCleared => self.scenario = None,
            SessionUpdate::Solved(outcome) => {
                self.solve = Some(outcome);
                self.video = None;
            }
            SessionUpdate::VideoRendered { source, artifacts } => {
                if self.solve.as_ref() != Some(&source) {
                    return Err(TutorError::Superseded("solution"));
                }
                self.video = Some(artifacts);
            }
        }
        Ok(())
    }
}

/// Public messages handled by the session actor.
#[derive(Debug)]
pub enum SessionMessage {
    /// Start a session for a freshly authenticated user.
    Open(String, RpcReplyPort<SessionId>),
    /// Snapshot of a live session; refreshes its idle timer.
    Resolve(SessionId, RpcReplyPort<Option<SessionState>>),
    /// Apply one update and reply with the resulting state.
    Update(
        SessionId,
        SessionUpdate,
        RpcReplyPort<Result<SessionState, TutorError>>,
    ),
    Close(SessionId),

    // Internal messages (sent by the actor itself)
    /// Drop sessions idle for longer than the TTL.
    Sweep,
}

/// Handle for interacting with the session actor.
#[derive(Clone)]
pub struct SessionHandle {
    actor: ActorRef<SessionMessage>,
}

impl SessionHandle {
    pub async fn open(&self, username: impl Into<String>) -> Result<SessionId, TutorError> {
        ractor::call!(self.actor, SessionMessage::Open, username.into())
            .map_err(|e| TutorError::SessionActor(format!("Open RPC failed: {e}")))
    }

    pub async fn resolve(&self, id: SessionId) -> Result<Option<SessionState>, TutorError> {
        ractor::call!(self.actor, SessionMessage::Resolve, id)
            .map_err(|e| TutorError::SessionActor(format!("Resolve RPC failed: {e}")))
    }

    pub async fn update(
        &self,
        id: SessionId,
        update: SessionUpdate,
    ) -> Result<SessionState, TutorError> {
        ractor::call!(self.actor, SessionMessage::Update, id, update)
            .map_err(|e| TutorError::SessionActor(format!("Update RPC failed: {e}")))?
    }

    pub async fn close(&self, id: SessionId) {
        let _ = ractor::cast!(self.actor, SessionMessage::Close(id));
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

struct SessionActorState {
    ttl: Duration,
    sessions: HashMap<SessionId, SessionEntry>,
    sweeper: Option<JoinHandle<()>>,
}

impl SessionActorState {
    fn is_expired(&self, entry: &SessionEntry) -> bool {
        entry.last_seen.elapsed() > self.ttl
    }

    /// Live entry for `id`, with its idle timer refreshed. Expired entries are
    /// removed on the spot.
    fn touch(&mut self, id: SessionId) -> Option<&mut SessionEntry> {
        let expired = self.sessions.get(&id).map(|e| self.is_expired(e))?;
        if expired {
            self.sessions.remove(&id);
            debug!(%id, "session expired on access");
            return None;
        }
        let entry = self.sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry)
    }
}

struct SessionActor;

#[ractor::async_trait]
impl Actor for SessionActor {
    type Msg = SessionMessage;
    type State = SessionActorState;
    type Arguments = Duration;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        ttl: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!(ttl_secs = ttl.as_secs(), "SessionActor starting");
        Ok(SessionActorState {
            ttl,
            sessions: HashMap::new(),
            sweeper: None,
        })
    }

    async fn post_start(
        &self,
        myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.sweeper = Some(myself.send_interval(SWEEP_EVERY, || SessionMessage::Sweep));
        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        if let Some(sweeper) = state.sweeper.take() {
            sweeper.abort();
        }
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SessionMessage::Open(username, rp) => {
                let id = Uuid::new_v4();
                info!(%id, username, "session opened");
                state.sessions.insert(
                    id,
                    SessionEntry {
                        state: SessionState::new(username),
                        last_seen: Instant::now(),
                    },
                );
                let _ = rp.send(id);
            }
            SessionMessage::Resolve(id, rp) => {
                let snapshot = state.touch(id).map(|e| e.state.clone());
                let _ = rp.send(snapshot);
            }
            SessionMessage::Update(id, update, rp) => {
                let result = match state.touch(id) {
                    Some(entry) => entry.state.apply(update).map(|_| entry.state.clone()),
                    None => Err(TutorError::Unauthenticated),
                };
                let _ = rp.send(result);
            }
            SessionMessage::Close(id) => {
                if let Some(entry) = state.sessions.remove(&id) {
                    info!(%id, username = %entry.state.username, "session closed");
                }
            }
            SessionMessage::Sweep => {
                let before = state.sessions.len();
                let ttl = state.ttl;
                state.sessions.retain(|_, e| e.last_seen.elapsed() <= ttl);
                let dropped = before - state.sessions.len();
                if dropped > 0 {
                    debug!(dropped, live = state.sessions.len(), "expired sessions swept");
                }
            }
        }
        Ok(())
    }
}

/// Spawn an unnamed session actor. Unnamed so tests can run several side by side.
pub async fn spawn(ttl: Duration) -> Result<SessionHandle, TutorError> {
    let (actor, _jh) = Actor::spawn(None, SessionActor, ttl)
        .await
        .map_err(|e| TutorError::SessionActor(format!("failed to spawn SessionActor: {e}")))?;
    Ok(SessionHandle { actor })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(correct: char) -> QuizItem {
        QuizItem {
            question: "2+2?".to_string(),
            options: vec!["A) 4".into(), "B) 5".into(), "C) 6".into(), "D) 7".into()],
            correct,
            explanation: "Arithmetic.".to_string(),
        }
    }

    fn outcome() -> SolveOutcome {
        SolveOutcome {
            solution: "x = 2".to_string(),
            script: "class MathExplanation(Scene): pass".to_string(),
            narration: "We solve for x.".to_string(),
            narration_found: true,
        }
    }

    #[test]
    fn answers_need_a_quiz_and_a_valid_index() {
        let mut state = SessionState::new("ada");
        let answer = || SessionUpdate::QuizAnswered {
            index: 0,
            answer: "A) 4".to_string(),
        };
        assert!(matches!(
            state.apply(answer()),
            Err(TutorError::MissingArtifact("quiz"))
        ));

        state
            .apply(SessionUpdate::QuizGenerated {
                topic: "Arithmetic".into(),
                items: vec![item('A'), item('B')],
            })
            .unwrap();
        state.apply(answer()).unwrap();
        assert!(matches!(
            state.apply(SessionUpdate::QuizAnswered {
                index: 2,
                answer: "A".into()
            }),
            Err(TutorError::InvalidInput(_))
        ));

        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.answers, vec![Some("A) 4".to_string()), None]);
        assert_eq!(quiz.score(), 50.0);
    }

    #[test]
    fn retake_clears_answers_but_keeps_questions() {
        let mut state = SessionState::new("ada");
        state
            .apply(SessionUpdate::QuizGenerated {
                topic: "Arithmetic".into(),
                items: vec![item('A')],
            })
            .unwrap();
        state
            .apply(SessionUpdate::QuizAnswered {
                index: 0,
                answer: "A".into(),
            })
            .unwrap();
        state.apply(SessionUpdate::QuizRetake).unwrap();

        let quiz = state.quiz.unwrap();
        assert_eq!(quiz.items.len(), 1);
        assert_eq!(quiz.answers, vec![None]);
    }

    fn artifacts() -> VideoArtifacts {
        VideoArtifacts {
            video: "v.mp4".into(),
            audio: "a.mp3".into(),
            final_video: "f.mp4".into(),
        }
    }

    #[test]
    fn new_solution_drops_stale_video() {
        let mut state = SessionState::new("ada");
        state.apply(SessionUpdate::Solved(outcome())).unwrap();
        state
            .apply(SessionUpdate::VideoRendered {
                source: outcome(),
                artifacts: artifacts(),
            })
            .unwrap();
        state.apply(SessionUpdate::Solved(outcome())).unwrap();
        assert!(state.video.is_none());
        assert!(state.solve.is_some());
    }

    #[test]
    fn video_for_replaced_solution_is_not_stored() {
        let mut state = SessionState::new("ada");
        state.apply(SessionUpdate::Solved(outcome())).unwrap();

        let mut resolved = outcome();
        resolved.solution = "x = 3".to_string();
        state.apply(SessionUpdate::Solved(resolved.clone())).unwrap();

        assert!(matches!(
            state.apply(SessionUpdate::VideoRendered {
                source: outcome(),
                artifacts: artifacts(),
            }),
            Err(TutorError::Superseded("solution"))
        ));
        assert!(state.video.is_none());
        assert_eq!(state.solve, Some(resolved));
    }

    #[tokio::test]
    async fn actor_opens_updates_and_closes_sessions() {
        let handle = spawn(Duration::from_secs(60)).await.unwrap();
        let id = handle.open("ada").await.unwrap();

        let state = handle
            .update(id, SessionUpdate::Solved(outcome()))
            .await
            .unwrap();
        assert_eq!(state.username, "ada");
        assert_eq!(
            handle.resolve(id).await.unwrap().unwrap().solve,
            Some(outcome())
        );

        handle.close(id).await;
        assert!(handle.resolve(id).await.unwrap().is_none());
        assert!(matches!(
            handle.update(id, SessionUpdate::ScenarioCleared).await,
            Err(TutorError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let handle = spawn(Duration::from_millis(1)).await.unwrap();
        let id = handle.open("ada").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.resolve(id).await.unwrap().is_none());
    }
}
