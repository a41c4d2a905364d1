use thiserror::Error;

use crate::Attempt;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("No upstream candidates for request")]
    NoCandidates,

    #[error("All {} upstream candidates failed", .0.len())]
    Exhausted(Vec<Attempt>),
}

impl ProxyError {
    /// Attempts made before giving up, if any were made
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        match self {
            Self::Exhausted(attempts) => attempts,
            _ => &[],
        }
    }
}
