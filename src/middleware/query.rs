use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::TutorError;

/// `Query<T>` whose rejections use the API error envelope.
pub struct TutorQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for TutorQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = TutorError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_query(rejection)),
        }
    }
}

fn invalid_query(rejection: QueryRejection) -> TutorError {
    TutorError::InvalidInput(rejection.body_text())
}
