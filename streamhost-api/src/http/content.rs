//! Content delivery through the upstream media server
//!
//! `/content/*` walks the upstream candidates for a path and streams the
//! first hit; `/api/content/resolve` does the player-side source fallback.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, Uri},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use streamhost_core::{
    models::{FileType, MediaFormat},
    playback::{alternative_sources, content_path, is_safe_content_path, CONTENT_PREFIX},
};
use streamhost_proxy::{forward_response, proxy_options_preflight};
use tracing::debug;

use crate::http::{AppError, AppResult, AppState};

/// `/content/*` proxy routes
pub fn create_content_router() -> Router<AppState> {
    Router::new().route(
        "/content/{*path}",
        get(proxy_content)
            .head(proxy_content)
            .options(proxy_options_preflight),
    )
}

/// Source resolution for the dashboard players
pub fn create_resolve_router() -> Router<AppState> {
    Router::new().route("/api/content/resolve", get(resolve_source))
}

/// GET|HEAD /content/{*path}
pub async fn proxy_content(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> AppResult<Response> {
    // The raw (still percent-encoded) path is what upstream expects
    let path = uri.path().strip_prefix(CONTENT_PREFIX).unwrap_or(uri.path());

    if !is_safe_content_path(path) {
        debug!(path = %path, "Rejected content path outside the content root");
        return Err(AppError::not_found("File not found"));
    }
    let Some(format) = MediaFormat::from_path(path) else {
        debug!(path = %path, "Unsupported content extension");
        return Err(AppError::not_found("File not found"));
    };

    let candidates = state.resolver.candidates(path, uri.query(), format);
    let hit = state
        .proxy
        .fetch_first(&method, &candidates, headers.get(header::RANGE))
        .await?;

    Ok(forward_response(
        hit,
        &method,
        format,
        state.config.proxy.vod_max_age_seconds,
    ))
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub src: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedSource {
    pub original: String,
    /// First reachable alternative, or the normalized original
    pub url: String,
    pub file_type: FileType,
    pub reachable: bool,
    pub tried: Vec<String>,
}

/// GET /api/content/resolve?src=
pub async fn resolve_source(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> AppResult<Json<ResolvedSource>> {
    let original = query
        .src
        .filter(|src| !src.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("src parameter required"))?;

    let alternatives = alternative_sources(&original, &state.resolver);
    let mut tried = Vec::with_capacity(alternatives.len());

    for alternative in &alternatives {
        tried.push(alternative.clone());
        if is_reachable(&state, alternative).await {
            return Ok(Json(ResolvedSource {
                file_type: FileType::detect(alternative),
                url: alternative.clone(),
                original,
                reachable: true,
                tried,
            }));
        }
    }

    let url = alternatives.into_iter().next().unwrap_or_default();
    Ok(Json(ResolvedSource {
        file_type: FileType::detect(&url),
        url,
        original,
        reachable: false,
        tried,
    }))
}

async fn is_reachable(state: &AppState, source: &str) -> bool {
    if let Some(proxied) = content_path(source) {
        let (path, query) = match proxied.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (proxied, None),
        };
        if !is_safe_content_path(path) {
            return false;
        }
        let Some(format) = MediaFormat::from_path(path) else {
            return false;
        };
        let candidates = state.resolver.candidates(path, query, format);
        return state.proxy.probe_first(&candidates).await.is_some();
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        return state.proxy.probe(source).await;
    }
    false
}
