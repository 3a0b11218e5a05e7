//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Model provider error types
///
/// Every failure mode of a model call maps to exactly one variant so that
/// callers can log a precise cause before substituting fallback content.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// TCP or DNS level failure reaching the endpoint
    #[error("Connection error: {0}")]
    Connect(String),

    /// Request exceeded the configured deadline
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Endpoint answered with a non-success HTTP status
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Endpoint answered 2xx but the generated text was empty or missing
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Provider misconfiguration (bad URL, client build failure)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the failure indicates the endpoint is unreachable,
    /// as opposed to a malformed exchange with a reachable one
    pub fn is_availability(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout(_))
    }
}
