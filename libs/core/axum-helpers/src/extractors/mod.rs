//! Extractors whose rejections render as [`AppError`](crate::errors::AppError)
//! bodies instead of axum's plain-text defaults.

pub mod json;
pub mod path;
pub mod validated_json;

pub use json::AppJson;
pub use path::AppPath;
pub use validated_json::ValidatedJson;
