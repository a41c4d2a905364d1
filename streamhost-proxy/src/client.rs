//! Candidate walk against the upstream media server

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use serde::Serialize;
use streamhost_core::config::ProxyConfig;
use tracing::{debug, info, warn};

use crate::ProxyError;

/// Outcome of one failed candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Upstream answered with a non-success status
    Status(u16),
    /// Transport failure or timeout
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub url: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// The first candidate that answered with a 2xx status
#[derive(Debug)]
pub struct UpstreamHit {
    pub url: String,
    pub response: reqwest::Response,
    /// Candidates tried and rejected before this one
    pub failed: Vec<Attempt>,
}

/// Shared HTTP client for talking to the media server
#[derive(Debug, Clone)]
pub struct ContentProxy {
    client: reqwest::Client,
    header_timeout: Duration,
    user_agent: String,
}

impl ContentProxy {
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            header_timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Request each candidate in order and return the first 2xx response.
    ///
    /// Only GET and HEAD are forwarded. The body of the winning response is
    /// left unread so it can be streamed to the client.
    pub async fn fetch_first(
        &self,
        method: &Method,
        candidates: &[String],
        range: Option<&HeaderValue>,
    ) -> Result<UpstreamHit, ProxyError> {
        if candidates.is_empty() {
            return Err(ProxyError::NoCandidates);
        }

        let method = if method == Method::HEAD {
            Method::HEAD
        } else {
            Method::GET
        };
        let mut failed = Vec::new();

        for url in candidates {
            debug!(url = %url, method = %method, "Trying upstream candidate");

            match self.send(method.clone(), url, range).await {
                Ok(response) if response.status().is_success() => {
                    info!(url = %url, status = response.status().as_u16(), "Serving from upstream");
                    return Ok(UpstreamHit {
                        url: url.clone(),
                        response,
                        failed,
                    });
                }
                Ok(response) => {
                    debug!(url = %url, status = response.status().as_u16(), "Upstream candidate rejected");
                    failed.push(Attempt {
                        url: url.clone(),
                        outcome: AttemptOutcome::Status(response.status().as_u16()),
                    });
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "Upstream candidate unreachable");
                    failed.push(Attempt {
                        url: url.clone(),
                        outcome: AttemptOutcome::Error(e),
                    });
                }
            }
        }

        warn!(attempts = failed.len(), "All upstream candidates failed");
        Err(ProxyError::Exhausted(failed))
    }

    /// `HEAD` a URL and report whether it answered with a 2xx status.
    pub async fn probe(&self, url: &str) -> bool {
        match self.send(Method::HEAD, url, None).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url = %url, error = %e, "Probe failed");
                false
            }
        }
    }

    /// First candidate whose `HEAD` succeeds
    pub async fn probe_first(&self, candidates: &[String]) -> Option<String> {
        for url in candidates {
            if self.probe(url).await {
                return Some(url.clone());
            }
        }
        None
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        range: Option<&HeaderValue>,
    ) -> Result<reqwest::Response, String> {
        let mut request = self
            .client
            .request(method, url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .header(header::ACCEPT, "*/*");

        if let Some(range) = range.filter(|r| !r.is_empty()) {
            request = request.header(header::RANGE, range.clone());
        }

        match tokio::time::timeout(self.header_timeout, request.send()).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "timed out after {}s waiting for response headers",
                self.header_timeout.as_secs()
            )),
        }
    }
}
