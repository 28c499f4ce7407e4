use crate::api::{
    ChatCompleter, ElevenLabsSpeech, GeminiApi, GoogleTranslateSpeech, OpenRouterApi,
    SpeechSynthesizer, TextGenerator, build_http_client, build_rate_limiter,
};
use crate::config::{Config, TtsProvider};
use crate::db::UserStorage;
use crate::error::TutorError;
use crate::handlers::{auth, explore, practice, progress, quiz, session, solve};
use crate::media::TesseractOcr;
use crate::service::{SessionHandle, SolvePipeline, TutorService, VideoPipeline, session_actor};
use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Handwritten uploads are raw image bytes; phone photos run to several MB.
pub const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: UserStorage,
    pub sessions: SessionHandle,
    pub tutor: TutorService,
    pub solver: SolvePipeline,
    pub video: VideoPipeline,
    pub ocr: TesseractOcr,
    key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// External services the state is wired to. Tests substitute fakes here.
pub struct Backends {
    pub generator: Arc<dyn TextGenerator>,
    pub chat: Arc<dyn ChatCompleter>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl Backends {
    /// The hosted services named by `cfg`, sharing one HTTP client and one
    /// outbound rate limiter.
    pub fn from_config(cfg: &Config) -> Result<Self, TutorError> {
        let client = build_http_client(cfg)?;
        let limiter = build_rate_limiter(cfg);
        let speech: Arc<dyn SpeechSynthesizer> = match cfg.tts_provider {
            TtsProvider::ElevenLabs => Arc::new(ElevenLabsSpeech::new(cfg, client.clone())),
            TtsProvider::Google => Arc::new(GoogleTranslateSpeech::new(cfg, client.clone())),
        };
        Ok(Self {
            generator: Arc::new(GeminiApi::new(cfg, client.clone(), limiter.clone())?),
            chat: Arc::new(OpenRouterApi::new(cfg, client, limiter)?),
            speech,
        })
    }
}

impl AppState {
    /// Connect storage, spawn the session actor and wire the hosted services.
    pub async fn build(cfg: Config) -> Result<Self, TutorError> {
        let users = UserStorage::connect(&cfg.database_url).await?;
        let backends = Backends::from_config(&cfg)?;
        Self::with_backends(cfg, users, backends).await
    }

    pub async fn with_backends(
        cfg: Config,
        users: UserStorage,
        backends: Backends,
    ) -> Result<Self, TutorError> {
        let key = cookie_key(&cfg)?;
        let sessions = session_actor::spawn(Duration::from_secs(cfg.session_ttl_secs)).await?;
        let config = Arc::new(cfg);
        Ok(Self {
            tutor: TutorService::new(backends.generator.clone()),
            solver: SolvePipeline::new(backends.generator, backends.chat, &config),
            video: VideoPipeline::new(config.clone(), backends.speech),
            ocr: TesseractOcr::new(config.tesseract_bin.clone()),
            users,
            sessions,
            key,
            config,
        })
    }
}

fn cookie_key(cfg: &Config) -> Result<Key, TutorError> {
    let Some(secret) = cfg.cookie_secret.as_deref() else {
        warn!("TUTOR_COOKIE_SECRET unset; sessions will not survive a restart");
        return Ok(Key::generate());
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(secret.trim())
        .map_err(|e| TutorError::InvalidInput(format!("cookie_secret is not base64: {e}")))?;
    Key::try_from(bytes.as_slice())
        .map_err(|_| TutorError::InvalidInput("cookie_secret must decode to at least 64 bytes".to_string()))
}

pub fn tutor_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/catalog", get(session::catalog))
        .route("/session", get(session::snapshot))
        .route("/progress", get(progress::progress))
        .route("/analytics", get(progress::analytics))
        .route("/solve", post(solve::solve))
        .route("/solve/video", post(solve::video))
        .route(
            "/solve/image",
            post(solve::image).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/practice", post(practice::generate))
        .route("/practice/feedback", post(practice::feedback))
        .route("/practice/save", post(practice::save))
        .route("/quiz", post(quiz::generate))
        .route("/quiz/answer", post(quiz::answer))
        .route("/quiz/submit", post(quiz::submit))
        .route("/quiz/retake", post(quiz::retake))
        .route("/concept", post(explore::concept))
        .route("/formulas", post(explore::formulas))
        .route("/videos", post(explore::videos))
        .route("/history", post(explore::history))
        .route(
            "/applications",
            post(explore::applications).delete(explore::clear_applications),
        )
        .route("/study-plan", post(explore::study_plan))
        .with_state(state)
}
