#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use math_tutor::api::{ChatCompleter, SpeechSynthesizer, TextGenerator};
use math_tutor::config::Config;
use math_tutor::db::UserStorage;
use math_tutor::error::TutorError;
use math_tutor::router::{AppState, Backends, tutor_router};
use math_tutor::types::gemini::Part;
use math_tutor::types::openrouter::ChatCompletion;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const NARRATED: &str =
    "1. Manim Code:\nclass MathExplanation(Scene):\n    pass\n\n2. Voiceover Script:\nWe isolate x.";

pub fn quiz_text() -> String {
    (1..=5)
        .map(|n| {
            format!(
                "Q: What is {n} + {n}?\nA) {}\nB) {}\nC) {}\nD) {}\nCorrect: A\nExplanation: Doubling {n}.\n\n",
                n * 2,
                n * 2 + 1,
                n * 2 + 2,
                n * 2 + 3,
            )
        })
        .collect()
}

/// Answers by prompt shape and records every prompt it sees.
#[derive(Default)]
pub struct FakeGenerator {
    pub prompts: Mutex<Vec<String>>,
    /// MIME type of every inline image part, in arrival order.
    pub inline: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_parts(&self, parts: Vec<Part>) -> Result<String, TutorError> {
        let prompt: String = parts.iter().filter_map(|p| p.text.clone()).collect();
        self.prompts.lock().unwrap().push(prompt.clone());
        self.inline.lock().unwrap().extend(
            parts
                .iter()
                .filter_map(|p| p.inline_data.as_ref())
                .map(|d| d.mime_type.clone()),
        );
        let reply = if prompt.starts_with("Create a multiple-choice quiz") {
            quiz_text()
        } else if prompt.starts_with("Generate 10") {
            "Q: 1+1?\nS: 2\n\nQ: 2+3?\nS: 5".to_string()
        } else if prompt.starts_with("Solve this") {
            "Step 1: subtract 3. Step 2: divide by 2. x = 2".to_string()
        } else {
            format!("generated for: {}", prompt.lines().next().unwrap_or_default())
        };
        Ok(reply)
    }
}

/// Returns the enhanced script for every model except `final_model`, which
/// gets the narrated two-section answer.
pub struct FakeChat {
    pub final_model: String,
    pub requests: Mutex<Vec<ChatCompletion>>,
}

#[async_trait]
impl ChatCompleter for FakeChat {
    async fn complete(&self, request: &ChatCompletion) -> Result<String, TutorError> {
        self.requests.lock().unwrap().push(request.clone());
        if request.model == self.final_model {
            Ok(NARRATED.to_string())
        } else {
            Ok("class MathExplanation(Scene):\n    def construct(self): pass".to_string())
        }
    }
}

pub struct SilentSpeech;

#[async_trait]
impl SpeechSynthesizer for SilentSpeech {
    async fn synthesize(&self, _text: &str, out: &Path) -> Result<PathBuf, TutorError> {
        tokio::fs::write(out, b"ID3").await?;
        Ok(out.to_path_buf())
    }
}

pub struct TestApp {
    pub router: Router,
    pub generator: Arc<FakeGenerator>,
    pub chat: Arc<FakeChat>,
    pub users: UserStorage,
    _dir: TempDir,
}

pub async fn test_app() -> TestApp {
    test_app_with(|_| {}).await
}

/// Like [`test_app`], with a hook that adjusts the config after the test
/// defaults are applied.
pub async fn test_app_with(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config::default();
    cfg.database_url = format!("sqlite:{}", dir.path().join("tutor.sqlite").display());
    cfg.work_dir = dir.path().to_path_buf();
    cfg.insecure_cookie = true;
    cfg.manim_bin = "manim-not-installed".to_string();
    cfg.tesseract_bin = "tesseract-not-installed".to_string();
    tweak(&mut cfg);

    let users = UserStorage::connect(&cfg.database_url)
        .await
        .expect("open sqlite");
    let generator = Arc::new(FakeGenerator::default());
    let chat = Arc::new(FakeChat {
        final_model: cfg.final_model.clone(),
        requests: Mutex::new(Vec::new()),
    });
    let backends = Backends {
        generator: generator.clone(),
        chat: chat.clone(),
        speech: Arc::new(SilentSpeech),
    };
    let state = AppState::with_backends(cfg, users.clone(), backends)
        .await
        .expect("build state");

    TestApp {
        router: tutor_router(state),
        generator,
        chat,
        users,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed")
    }

    /// POST a raw body, the way browsers upload a file.
    pub async fn send_bytes(
        &self,
        uri: &str,
        cookie: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// Register and log in; returns the session cookie pair.
    pub async fn login(&self, username: &str) -> String {
        let creds = serde_json::json!({ "username": username, "password": "hunter2" });
        self.send("POST", "/auth/register", None, Some(creds.clone()))
            .await;
        let resp = self.send("POST", "/auth/login", None, Some(creds)).await;
        session_cookie(&resp).expect("login sets a session cookie")
    }
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("tutor_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not json")
}
