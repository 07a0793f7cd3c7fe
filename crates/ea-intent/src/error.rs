//! Resolver error types.
//!
//! None of these reach callers of the classifier: a failed fallback is
//! logged and the query resolves to `free_text`.

use thiserror::Error;

/// Errors from the language-model fallback path.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("fallback request failed: {0}")]
    Http(String),

    #[error("fallback returned HTTP {0}")]
    Status(u16),

    #[error("fallback returned no content")]
    EmptyResponse,

    #[error("malformed fallback output: {0}")]
    MalformedResponse(String),
}

/// Convenience alias for resolver results.
pub type IntentResult<T> = Result<T, IntentError>;
