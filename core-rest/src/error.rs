//! Error types for the request translator

use bridge_traits::error::TransportError;
use thiserror::Error;

/// Request translator errors
///
/// Every failure a call can produce reaches the caller as one of these;
/// nothing is retried and nothing is swallowed.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The transport could not complete the exchange
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A success status arrived with a body that does not decode as rows
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// The message a UI layer would surface for this failure.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, ApiError>;
