//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The retry policy
//! classifies errors through [`ExtractionError::is_retryable`].

use thiserror::Error;

/// Errors that can occur during extraction operations.
///
/// The deterministic heuristic pipeline never produces these; they
/// originate from the remote model strategy and its configuration.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Remote endpoint unreachable, non-success status, or timeout.
    ///
    /// `status` carries the HTTP status, with two surrogates:
    /// 408 for a client-side timeout and 0 for a bare network
    /// failure with no response at all.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model reply was not the expected JSON shape.
    #[error("failed to parse model reply: {0}")]
    Parsing(String),

    /// Remote strategy invoked while unconfigured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractionError {
    /// Whether the retry policy should attempt this operation again.
    ///
    /// Retryable: request timeout (408), rate limiting (429), any
    /// 5xx server error, and the status-0 network surrogate. All
    /// other failures are terminal, including parsing errors and
    /// the remaining 4xx client errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => {
                matches!(*status, 0 | 408 | 429) || (500..600).contains(status)
            }
            Self::Parsing(_) | Self::Config(_) => false,
        }
    }

    /// Short classification label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::Parsing(_) => "parsing",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
