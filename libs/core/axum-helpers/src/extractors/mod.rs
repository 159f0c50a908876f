//! Custom extractors for Axum handlers.
//!
//! Rejections are rendered through [`AppError`](crate::errors::AppError) so
//! they share the API's error body.

pub mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonOrDefault};
