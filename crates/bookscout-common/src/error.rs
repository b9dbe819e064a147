//! Common error types used throughout bookscout.
//!
//! Only [`Error::Transport`] and [`Error::Parse`] describe the outcome of a
//! search run; they are the variants the pipeline delivers to its consumer.
//! The remaining variants are raised synchronously to the caller.

/// Common error type for bookscout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The catalog request failed or answered with a non-200 status.
    #[error("Transport error{}: {cause}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Human-readable cause.
        cause: String,
    },

    /// The catalog payload is missing its required top-level structure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The search query cannot be submitted.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The requested page size is outside the accepted range.
    #[error("Invalid max results: {0} (expected 1..={max})", max = crate::MaxResults::MAX)]
    InvalidMaxResults(u32),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a Transport error for a non-200 response.
    pub fn transport_status(status: u16) -> Self {
        Self::Transport {
            status: Some(status),
            cause: format!("unexpected response status {status}"),
        }
    }

    /// Create a Transport error for a failure before any status was received.
    pub fn transport<S: Into<String>>(cause: S) -> Self {
        Self::Transport {
            status: None,
            cause: cause.into(),
        }
    }

    /// Create a new Parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new InvalidQuery error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is the terminal outcome of a search run.
    pub fn is_run_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Parse(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
