//! Turning an upstream hit into the client response

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use streamhost_core::models::MediaFormat;

use crate::UpstreamHit;

/// Headers that describe the upstream connection, not the content
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// CORS headers attached to every `/content` response, preflights included
#[must_use]
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, HEAD, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Range"),
    );
    headers
}

/// Headers the proxy imposes on proxied content, whatever upstream said
#[must_use]
pub fn media_headers(format: MediaFormat, vod_max_age_seconds: u64) -> HeaderMap {
    let mut headers = cors_headers();
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    for (name, value) in format.cache_policy(vod_max_age_seconds).headers() {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }
    headers
}

/// Stream the upstream response back to the client.
///
/// Status (200 or 206) and content headers such as `Content-Length` and
/// `Content-Range` pass through; hop-by-hop headers are dropped and
/// [`media_headers`] override the rest.
#[must_use]
pub fn forward_response(
    hit: UpstreamHit,
    method: &Method,
    format: MediaFormat,
    vod_max_age_seconds: u64,
) -> Response {
    let status = hit.response.status();

    let mut headers = HeaderMap::with_capacity(hit.response.headers().len() + 8);
    for (name, value) in hit.response.headers() {
        if HOP_BY_HOP.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    for (name, value) in &media_headers(format, vod_max_age_seconds) {
        headers.insert(name.clone(), value.clone());
    }

    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from_stream(hit.response.bytes_stream())
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Preflight handler suitable for `OPTIONS` routes.
#[allow(clippy::unused_async)]
pub async fn proxy_options_preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, cors_headers())
}
