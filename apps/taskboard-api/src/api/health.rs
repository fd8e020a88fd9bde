//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ReadinessResponse {
    status: &'static str,
    mongodb: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time_ms: Option<u64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when MongoDB answers a ping, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    if health.healthy {
        (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                mongodb: true,
                response_time_ms: Some(health.response_time_ms),
            }),
        )
    } else {
        tracing::warn!(error = ?health.message, "MongoDB readiness check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "unhealthy",
                mongodb: false,
                response_time_ms: None,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{body::Body, http::Request};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unreachable_mongo_is_503() {
        // Nothing listens on port 1; server selection gives up quickly.
        let url = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";
        let mongo_client = mongodb::Client::with_uri_str(url).await.unwrap();
        let state = AppState {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::new(url),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: mongo_client.database("taskboard_test"),
            mongo_client,
        };

        let response = router(state)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["mongodb"], false);
    }
}
