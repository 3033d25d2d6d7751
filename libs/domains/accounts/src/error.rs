use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Faults raised by the accounts domain.
///
/// Only the backing store can fail. Rejected input is reported as an
/// [`AuthOutcome`](crate::models::AuthOutcome) value.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Convert AccountError to AppError for standardized error responses
impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Database(msg) => {
                AppError::InternalServerError(format!("An internal error occurred: {}", msg))
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for AccountError {
    fn from(err: mongodb::error::Error) -> Self {
        AccountError::Database(err.to_string())
    }
}
