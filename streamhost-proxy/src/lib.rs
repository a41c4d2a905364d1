//! Content proxy for the upstream media server
//!
//! Walks the candidate URLs produced by
//! [`streamhost_core::UpstreamResolver`] and streams the first successful
//! response back with the proxy's own content and caching headers.

mod client;
mod error;
mod response;

pub use client::{Attempt, AttemptOutcome, ContentProxy, UpstreamHit};
pub use error::ProxyError;
pub use response::{cors_headers, forward_response, media_headers, proxy_options_preflight};
