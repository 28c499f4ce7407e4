use crate::extract::ExtractError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TutorError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Nothing to work with yet: {0}")]
    MissingArtifact(&'static str),

    #[error("Replaced while working on it: {0}")]
    Superseded(&'static str),

    #[error("Generation returned no text")]
    EmptyGeneration,

    #[error("Upstream error with status {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Could not read generated text: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Rendered video directory not found: {}", .0.display())]
    VideoDirMissing(PathBuf),

    #[error("No rendered video in {}", .0.display())]
    VideoNotFound(PathBuf),

    #[error("Media file not found: {}", .0.display())]
    MediaMissing(PathBuf),

    #[error("{tool} failed: {detail}")]
    Subprocess { tool: String, detail: String },

    #[error("Session actor error: {0}")]
    SessionActor(String),
}

impl TutorError {
    /// Transient failures worth another attempt: network hiccups, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            TutorError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            TutorError::Upstream { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn subprocess(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        TutorError::Subprocess {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for TutorError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            TutorError::UsernameTaken(_) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new("USERNAME_TAKEN", "Username already exists"),
            ),
            TutorError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("INVALID_CREDENTIALS", "Invalid username or password"),
            ),
            TutorError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("UNAUTHORIZED", "Please log in first."),
            ),
            TutorError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, ApiErrorBody::new("INVALID_INPUT", msg))
            }
            TutorError::MissingArtifact(what) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new("NOT_READY", format!("Nothing to work with yet: {what}")),
            ),
            TutorError::Superseded(what) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new(
                    "SUPERSEDED",
                    format!("The {what} changed while this request ran. Please try again."),
                ),
            ),
            TutorError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new(
                    "UNEXPECTED_FORMAT",
                    format!("{e}. Please try generating again."),
                ),
            ),
            TutorError::EmptyGeneration => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody::new(
                    "EMPTY_RESPONSE",
                    "API response blocked or invalid. Please try again.",
                ),
            ),
            TutorError::Upstream { status, .. } => {
                let (code, msg) = match status {
                    StatusCode::TOO_MANY_REQUESTS => ("RATE_LIMIT", "Upstream rate limit exceeded."),
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        ("UPSTREAM_AUTH", "Upstream authentication failed.")
                    }
                    _ => ("UPSTREAM_ERROR", "An upstream error occurred."),
                };
                (StatusCode::BAD_GATEWAY, ApiErrorBody::new(code, msg))
            }
            TutorError::Reqwest(_) | TutorError::UrlParse(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody::new("BAD_GATEWAY", "Upstream service is unavailable."),
            ),
            e @ (TutorError::VideoDirMissing(_)
            | TutorError::VideoNotFound(_)
            | TutorError::MediaMissing(_)
            | TutorError::Subprocess { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("MEDIA_FAILED", format!("Video generation failed: {e}")),
            ),
            TutorError::Json(_)
            | TutorError::Io(_)
            | TutorError::DatabaseError(_)
            | TutorError::Config(_)
            | TutorError::MissingConfig(_)
            | TutorError::SessionActor(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred."),
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Error envelope returned by the Gemini API.
#[derive(Deserialize, Debug)]
pub struct GeminiError {
    pub error: GeminiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct GeminiErrorBody {
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Error envelope returned by OpenRouter and other OpenAI-compatible APIs.
#[derive(Deserialize, Debug)]
pub struct OpenAiError {
    pub error: OpenAiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct OpenAiErrorBody {
    pub message: String,
}

/// Turn a non-success upstream response into `TutorError::Upstream`,
/// keeping whatever message the body carries.
pub async fn upstream_error(resp: reqwest::Response) -> TutorError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .or_else(|_| serde_json::from_str::<OpenAiError>(&body).map(|e| e.error.message))
        .unwrap_or(body);
    TutorError::Upstream { status, message }
}
