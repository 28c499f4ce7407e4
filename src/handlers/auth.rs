use crate::db::Progress;
use crate::error::TutorError;
use crate::middleware::TutorJson;
use crate::middleware::auth::{clear_session_cookie, session_cookie, session_id};
use crate::router::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    fn validated(self) -> Result<Self, TutorError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(TutorError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }
        Ok(Self {
            username: self.username.trim().to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AccountReply {
    pub username: String,
    pub progress: Progress,
}

/// POST /auth/register -> creates the account; logging in is a separate step.
pub async fn register(
    State(state): State<AppState>,
    TutorJson(creds): TutorJson<Credentials>,
) -> Result<Response, TutorError> {
    let creds = creds.validated()?;
    let hash = state.config.hash_algorithm.hash(&creds.password);
    state.users.create_user(&creds.username, &hash).await?;

    info!(username = %creds.username, "account registered");
    let reply = AccountReply {
        username: creds.username,
        progress: Progress::default(),
    };
    Ok((StatusCode::CREATED, Json(reply)).into_response())
}

/// POST /auth/login -> verifies the password, opens a session and sets the cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    TutorJson(creds): TutorJson<Credentials>,
) -> Result<Response, TutorError> {
    let creds = creds.validated()?;
    let user = state
        .users
        .find_user(&creds.username)
        .await?
        .ok_or(TutorError::InvalidCredentials)?;
    let stored = user.password_hash.as_deref().unwrap_or_default();
    if !state.config.hash_algorithm.verify(&creds.password, stored) {
        warn!(username = %creds.username, "login rejected");
        return Err(TutorError::InvalidCredentials);
    }

    let progress = user.progress()?;
    let id = state.sessions.open(&user.username).await?;
    let jar = jar.add(session_cookie(
        id,
        state.config.session_ttl_secs,
        state.config.insecure_cookie,
    ));

    let reply = AccountReply {
        username: user.username,
        progress,
    };
    Ok((jar, Json(reply)).into_response())
}

/// POST /auth/logout -> drops the session state and clears the cookie.
pub async fn logout(State(state): State<AppState>, jar: PrivateCookieJar) -> impl IntoResponse {
    if let Some(id) = session_id(&jar) {
        state.sessions.close(id).await;
    }
    (jar.remove(clear_session_cookie()), StatusCode::NO_CONTENT)
}
