use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

static STREAM_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,128}$").expect("invalid stream name pattern"));

/// Name of a live stream on the media server (`<login>_live`).
///
/// Only characters that are safe in a URL path segment, an HTML attribute
/// and a JS string literal are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StreamName(String);

impl StreamName {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !STREAM_NAME_RE.is_match(trimmed) || trimmed.starts_with('.') {
            return Err(Error::InvalidInput(format!("Invalid stream name: {raw:?}")));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The live stream a dashboard login publishes to
    pub fn live_for_login(login: &str) -> Result<Self> {
        let login = login.trim();
        if login.is_empty() {
            return Err(Error::InvalidInput("Login is required".to_string()));
        }
        Self::parse(&format!("{login}_live"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
