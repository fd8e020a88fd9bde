//! Extractors whose rejections render as [`AppError`](crate::errors::AppError)
//! JSON bodies instead of axum's plain-text defaults.

pub mod json;
pub mod validated_json;

pub use json::{AppJson, AppQuery};
pub use validated_json::{ValidatedJson, ValidationRules};
