//! Feed errors

use thiserror::Error;

/// Errors from the upstream data providers
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered with a non-success status
    #[error("upstream error from {source_name}: {status} - {body}")]
    Upstream {
        source_name: &'static str,
        status: u16,
        body: String,
    },
    /// Provider answered but the series has no rows
    #[error("empty series: {0}")]
    EmptySeries(String),
    /// Provider payload did not match the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}
