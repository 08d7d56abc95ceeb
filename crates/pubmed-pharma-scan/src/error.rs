//! Error types for the PubMed scan pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the PubMed client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Rate limited by NCBI (429 response); the pacing policy should prevent this.
    #[error("rate limited by NCBI, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry.
        retry_after: Duration,
    },

    /// Malformed query rejected by the upstream (400 response or esearch ERROR).
    #[error("query rejected by PubMed: {message}")]
    BadQuery {
        /// Error message from the upstream.
        message: String,
    },

    /// esearch JSON response could not be decoded.
    #[error("failed to decode esearch response: {0}")]
    Json(#[from] serde_json::Error),

    /// efetch XML document was unreadable as a whole.
    ///
    /// Per-article problems are not surfaced here; broken articles are
    /// skipped and the run continues.
    #[error("failed to parse efetch response: {message}")]
    Xml {
        /// Description of the parse failure.
        message: String,
    },

    /// Server error (5xx response).
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Unexpected HTTP status.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a bad query error.
    #[must_use]
    pub fn bad_query(message: impl Into<String>) -> Self {
        Self::BadQuery { message: message.into() }
    }

    /// Create an XML parse error.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::bad_query("unbalanced parentheses");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_display_messages() {
        let err = ClientError::bad_query("unknown field tag");
        assert!(err.to_string().contains("unknown field tag"));

        let err = ClientError::server(502, "bad gateway");
        assert!(err.to_string().contains("502"));
    }
}
