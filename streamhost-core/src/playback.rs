//! Playback source normalization used by the embedded players
//!
//! Player pages and dashboard previews hand us whatever the catalog or the
//! user supplied: bare paths, `/content` paths or direct media server URLs.

use percent_encoding::percent_decode_str;

use crate::upstream::UpstreamResolver;

pub const CONTENT_PREFIX: &str = "/content";

/// Turn a source into something a browser on this origin can load.
///
/// Absolute URLs pass through; everything else is routed via `/content`.
#[must_use]
pub fn normalize_source(src: &str) -> String {
    let src = src.trim();
    if src.is_empty() {
        return String::new();
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return src.to_string();
    }
    if src.starts_with(CONTENT_PREFIX) {
        return src.to_string();
    }
    if src.starts_with('/') {
        return format!("{CONTENT_PREFIX}{src}");
    }
    if let Some(idx) = src.find("content/") {
        return format!("/{}", &src[idx..]);
    }
    format!("{CONTENT_PREFIX}/{}", src.trim_start_matches('/'))
}

/// Path below `/content` for a proxied source, if it is one.
#[must_use]
pub fn content_path(src: &str) -> Option<&str> {
    let rest = src.strip_prefix(CONTENT_PREFIX)?;
    if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Whether a request path stays below the content root once the media
/// server's URL parser is done with it.
///
/// Segments are checked after percent-decoding, so `%2e%2e` and `.%2E`
/// count as `..`. Backslashes separate segments like slashes do.
#[must_use]
pub fn is_safe_content_path(path: &str) -> bool {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    decoded
        .split(['/', '\\'])
        .all(|segment| segment != "." && segment != "..")
}

/// Ordered list of places a source might be playable from.
///
/// The normalized source comes first, then a direct media server URL
/// rewritten onto the proxy (full VOD application prefix first, then its
/// root such as `/vod`), then the media server's own VOD URL on every
/// upstream host. No URL is derived from a path that leaves the content
/// root.
#[must_use]
pub fn alternative_sources(src: &str, resolver: &UpstreamResolver) -> Vec<String> {
    let normalized = normalize_source(src);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut alternatives = vec![normalized.clone()];

    for host in resolver.hosts() {
        for prefix in [resolver.direct_vod_prefix(host), resolver.direct_vod_root_prefix(host)] {
            if let Some(rest) = normalized.strip_prefix(&prefix) {
                if rest.starts_with('/') && is_safe_content_path(rest) {
                    push_unique(&mut alternatives, format!("{CONTENT_PREFIX}{rest}"));
                }
            }
        }
    }

    if let Some(path) = content_path(&normalized).filter(|p| is_safe_content_path(p)) {
        for host in resolver.hosts() {
            push_unique(&mut alternatives, format!("{}{path}", resolver.direct_vod_prefix(host)));
        }
    }

    alternatives
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
