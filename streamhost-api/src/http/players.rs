//! Embeddable player pages

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use streamhost_core::{
    models::StreamName,
    service::{embed_bundle, EmbedBundle, PlayerRequest, PLAYER_ERROR_PAGE},
    Error,
};

use crate::http::{AppError, AppResult, AppState};

pub fn create_players_router() -> Router<AppState> {
    Router::new()
        .route("/api/players/iframe", get(iframe_player))
        .route("/api/players/social", get(social_player))
        .route("/api/players/embeds", get(embed_catalogue))
}

fn error_page() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(PLAYER_ERROR_PAGE)).into_response()
}

/// Player pages are loaded into iframes, so failures are HTML too
fn player_failure(state: &AppState, err: Error) -> Response {
    match err {
        Error::InvalidInput(message) => match state.pages.render_invalid(&message) {
            Ok(html) => (StatusCode::BAD_REQUEST, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render invalid request page");
                (StatusCode::BAD_REQUEST, Html(PLAYER_ERROR_PAGE)).into_response()
            }
        },
        other => {
            tracing::error!(error = %other, "Failed to resolve player source");
            error_page()
        }
    }
}

/// GET /api/players/iframe?stream=|playlist=|video=
pub async fn iframe_player(
    State(state): State<AppState>,
    Query(request): Query<PlayerRequest>,
) -> Response {
    let source = match state.players.resolve(&request).await {
        Ok(source) => source,
        Err(e) => return player_failure(&state, e),
    };

    match state.pages.render_iframe(&source) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render iframe player");
            error_page()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SocialQuery {
    pub stream: Option<String>,
}

/// GET /api/players/social?stream=
pub async fn social_player(
    State(state): State<AppState>,
    Query(query): Query<SocialQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let Some(raw) = query.stream.filter(|s| !s.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Stream parameter required").into_response();
    };
    let stream = match StreamName::parse(&raw) {
        Ok(stream) => stream,
        Err(e) => return player_failure(&state, e),
    };

    let video_url = state.resolver.live_playlist_url(&stream);
    let page_url = request_url(&headers, &uri);

    match state.pages.render_social(&stream, &video_url, &page_url) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render social player");
            error_page()
        }
    }
}

/// Absolute URL of the current request as the client addressed it
fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    format!("{scheme}://{host}{path}")
}

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    pub login: Option<String>,
}

/// GET /api/players/embeds?login=
pub async fn embed_catalogue(
    State(state): State<AppState>,
    Query(query): Query<EmbedQuery>,
) -> AppResult<Json<EmbedBundle>> {
    let login = query
        .login
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::bad_request("login parameter required"))?;

    Ok(Json(embed_bundle(&state.resolver, &login)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn request_url_defaults_to_http() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("tv.example.com"));
        let uri: Uri = "/api/players/social?stream=abc".parse().unwrap();

        assert_eq!(
            request_url(&headers, &uri),
            "http://tv.example.com/api/players/social?stream=abc"
        );
    }

    #[test]
    fn request_url_honours_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("tv.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        let uri: Uri = "/api/players/social?stream=abc".parse().unwrap();

        assert_eq!(
            request_url(&headers, &uri),
            "https://tv.example.com/api/players/social?stream=abc"
        );
    }
}
