//! Error types for the platform boundary.

use thiserror::Error;

/// Errors returned by outbound API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The client has not logged in, or the session was lost.
    #[error("client is not connected")]
    NotConnected,

    /// The call did not complete in time.
    #[error("API call timed out")]
    Timeout,

    /// The platform rejected the call.
    #[error("API error ({code}): {message}")]
    Response {
        /// Platform status code.
        code: i64,
        /// Human-readable message from the platform.
        message: String,
    },

    /// A request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors surfaced by the gateway connection itself.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The platform refused the authentication token.
    #[error("login rejected: {reason}")]
    LoginRejected {
        /// Reason reported by the platform.
        reason: String,
    },

    /// An operation that requires a live session was attempted without one.
    #[error("gateway is not connected")]
    NotConnected,

    /// The connection dropped and could not be resumed.
    #[error("connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for closure.
        reason: String,
    },

    /// An API error during a gateway-level operation.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
