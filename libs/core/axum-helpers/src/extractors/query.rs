//! Query string extractor whose rejection renders as [`AppError`].

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Query string extractor.
///
/// A missing or malformed parameter is reported as a 400 through
/// [`AppError::QueryExtractorRejection`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request, StatusCode}, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Credentials {
        email: String,
        password: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/signin",
            get(|AppQuery(c): AppQuery<Credentials>| async move {
                format!("{}:{}", c.email, c.password.len())
            }),
        )
    }

    #[tokio::test]
    async fn test_query_is_decoded() {
        let response = app()
            .oneshot(
                Request::get("/signin?email=a%40b.com&password=pw")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"a@b.com:2");
    }

    #[tokio::test]
    async fn test_missing_parameter_is_400() {
        let response = app()
            .oneshot(Request::get("/signin?email=a%40b.com").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: crate::ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "INVALID_QUERY");
    }
}
