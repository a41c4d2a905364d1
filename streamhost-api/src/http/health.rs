//! Health check endpoints
//!
//! `/api/health` reports database connectivity for monitoring probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::http::AppState;

/// Health check router
pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/test", get(api_test))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Database round-trip; 500 when the catalog is unreachable
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.catalog.ping().await {
        Ok(()) => Json(json!({
            "status": "ok",
            "database": "connected",
            "timestamp": timestamp(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "database": "disconnected",
                    "error": e.to_string(),
                    "timestamp": timestamp(),
                })),
            )
                .into_response()
        }
    }
}

pub async fn api_test() -> impl IntoResponse {
    Json(json!({
        "message": "API working",
        "timestamp": timestamp(),
    }))
}
