//! Error types for the aggregation core.
//!
//! Every failure on the way from the remote API to a merged aggregate ends up
//! as an [`AggregateError`]. A missing artist is not an error: lookups return
//! `Option` for that.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised while fetching, decoding or correlating the source collections.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("Failed to fetch {resource} from {url}: {source}")]
    Fetch {
        resource: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote API answered with a non-success status.
    #[error("Remote API returned {status} for {resource} ({url})")]
    Status {
        resource: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body did not match the expected shape.
    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The four collections cannot be aligned by position.
    #[error(
        "Source collections have mismatched lengths \
         (artists: {artists}, locations: {locations}, dates: {dates}, relations: {relations})"
    )]
    Correlation {
        artists: usize,
        locations: usize,
        dates: usize,
        relations: usize,
    },
}

impl AggregateError {
    /// True for transport and status failures, false for shape problems.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }
}

/// Convenience Result type for the aggregation core.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Result handed out by the aggregate cache. One failed build is reported to
/// every caller that waited on it, so the error is shared.
pub type SharedResult<T> = std::result::Result<T, Arc<AggregateError>>;
