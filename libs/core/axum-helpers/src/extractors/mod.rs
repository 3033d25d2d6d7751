//! Custom extractors for Axum handlers.
//!
//! These wrap axum's built-in extractors so that rejections are rendered
//! through [`AppError`](crate::AppError) instead of plain-text bodies.

pub mod json;
pub mod query;

pub use json::AppJson;
pub use query::AppQuery;
