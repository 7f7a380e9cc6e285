//! Advisory transport error types.
//!
//! These classify failures when calling the external advisory services.
//! They are retried up to the configured bound and then converted into
//! fallback results, so a failed call never aborts the caller's workflow.

use thiserror::Error;

/// Errors that can occur when calling an advisory service.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// The request exceeded the configured deadline.
    #[error("advisory request timed out")]
    Timeout,

    /// A network-level failure (connection refused, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("advisory service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The service answered 2xx but the body did not parse.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}
