// src/github/error.rs
// =============================================================================
// The ways a single page fetch can fail.
//
// Every variant is terminal for that one fetch: the controller logs it and
// waits for the next scroll trigger. Nothing is retried automatically.
//
// Rust concepts:
// - thiserror: Derives std::error::Error and Display for an enum
// - #[from]: Lets the ? operator convert the wrapped error automatically
// =============================================================================

use thiserror::Error;

/// Errors produced by a page fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be built (bad base URL)
    #[error("invalid request URL: {0}")]
    InvalidRequest(#[from] url::ParseError),

    /// DNS failure, refused connection, timeout, or a broken body stream
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not have the shape of a search response
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label for log lines and the terminal summary
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidRequest(_) => "invalid request",
            FetchError::Transport(_) => "transport",
            FetchError::Decode(_) => "decode",
        }
    }
}
