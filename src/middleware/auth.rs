use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use crate::error::TutorError;
use crate::router::AppState;
use crate::service::{SessionId, SessionState};

pub const SESSION_COOKIE: &str = "tutor_session";

/// The caller's live session, resolved from the private session cookie.
/// Rejects with `Unauthenticated` when the cookie is missing, tampered with
/// or points at an expired session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: SessionId,
    pub state: SessionState,
}

impl SessionContext {
    pub fn username(&self) -> &str {
        &self.state.username
    }
}

/// Session id carried by the cookie, if it decrypts and parses.
pub fn session_id(jar: &PrivateCookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = TutorError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(jar) = PrivateCookieJar::<Key>::from_request_parts(parts, state).await;
        let id = session_id(&jar).ok_or(TutorError::Unauthenticated)?;

        let app = AppState::from_ref(state);
        let session = app
            .sessions
            .resolve(id)
            .await?
            .ok_or(TutorError::Unauthenticated)?;
        Ok(Self { id, state: session })
    }
}

pub fn session_cookie(id: SessionId, ttl_secs: u64, insecure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX)))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
