//! JSON extractor that runs an ordered list of validation rules.

use crate::errors::{AppError, FieldViolation};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Ordered validation rules for a request payload.
///
/// Every rule is evaluated and each failure reported in rule order; the first
/// entry becomes the response `message`.
pub trait ValidationRules {
    fn violations(&self) -> Vec<FieldViolation>;

    fn check(&self) -> Result<(), AppError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// JSON extractor that rejects with [`AppError::Validation`] when any rule fails.
///
/// # Example
/// ```ignore
/// use axum_helpers::{FieldViolation, ValidatedJson, ValidationRules};
///
/// #[derive(Deserialize)]
/// struct Rename { name: String }
///
/// impl ValidationRules for Rename {
///     fn violations(&self) -> Vec<FieldViolation> {
///         if self.name.is_empty() {
///             vec![FieldViolation::new("name", "Name is required", &self.name)]
///         } else {
///             vec![]
///         }
///     }
/// }
///
/// async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> String { body.name }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidationRules,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.check()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Pair {
        #[serde(default)]
        first: String,
        #[serde(default)]
        second: String,
    }

    impl ValidationRules for Pair {
        fn violations(&self) -> Vec<FieldViolation> {
            let mut out = Vec::new();
            if self.first.is_empty() {
                out.push(FieldViolation::new("first", "first is required", &self.first));
            }
            if self.second.is_empty() {
                out.push(FieldViolation::new("second", "second is required", &self.second));
            }
            out
        }
    }

    async fn echo(ValidatedJson(pair): ValidatedJson<Pair>) -> String {
        format!("{}-{}", pair.first, pair.second)
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(echo));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_first_failing_rule_becomes_message() {
        let (status, body) = send("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "first is required");
        assert_eq!(body["details"]["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_valid_payload_passes_through() {
        let app = Router::new().route("/", post(echo));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"first":"a","second":"b"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"a-b");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_with_message() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
        assert!(body["message"].is_string());
    }
}
