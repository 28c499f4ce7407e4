use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;

use crate::error::TutorError;

/// `Json<T>` whose rejections use the API error envelope.
pub struct TutorJson<T>(pub T);

impl<S, T> FromRequest<S> for TutorJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = TutorError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(invalid_body(rejection)),
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> TutorError {
    TutorError::InvalidInput(rejection.body_text())
}
