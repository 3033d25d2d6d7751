//! JSON body extractor whose rejection renders as [`AppError`].

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

/// JSON extractor and response wrapper.
///
/// Behaves like [`axum::Json`], but a body that cannot be parsed is reported
/// through [`AppError::JsonExtractorRejection`] so clients get the standard
/// [`ErrorResponse`](crate::ErrorResponse) shape.
///
/// # Example
/// ```ignore
/// use axum_helpers::AppJson;
///
/// async fn sign_up(AppJson(candidate): AppJson<NewAccount>) -> AppJson<AuthResponse> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}
