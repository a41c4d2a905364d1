//! Live stream status for the dashboard

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use streamhost_core::models::StreamName;

use crate::http::{AppError, AppResult, AppState};

pub fn create_streaming_router() -> Router<AppState> {
    Router::new()
        .route("/api/streaming/status", get(stream_status))
        .route("/api/streaming/obs-status", get(stream_status))
}

#[derive(Debug, Deserialize)]
pub struct StreamStatusQuery {
    pub login: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LiveStreamStatus {
    pub is_live: bool,
    pub stream: StreamName,
    /// Public playlist URL, whether or not the encoder is publishing
    pub stream_url: String,
}

#[derive(Debug, Serialize)]
pub struct StreamStatusResponse {
    pub success: bool,
    pub obs_stream: LiveStreamStatus,
}

/// GET /api/streaming/status?login=
///
/// A login's `<login>_live` stream is live when any upstream host serves
/// its playlist.
pub async fn stream_status(
    State(state): State<AppState>,
    Query(query): Query<StreamStatusQuery>,
) -> AppResult<Json<StreamStatusResponse>> {
    let login = query
        .login
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::bad_request("login parameter required"))?;
    let stream = StreamName::live_for_login(&login)?;

    let candidates = state.resolver.live_candidates(&stream);
    let is_live = state.proxy.probe_first(&candidates).await.is_some();
    tracing::debug!(stream = %stream, is_live, "Checked live stream status");

    Ok(Json(StreamStatusResponse {
        success: true,
        obs_stream: LiveStreamStatus {
            is_live,
            stream_url: state.resolver.live_playlist_url(&stream),
            stream,
        },
    }))
}
