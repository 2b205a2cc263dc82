//! Error types for response and client operations.

use http::StatusCode;
use thiserror::Error;

/// Error type for response read operations.
///
/// This enum categorizes the failures an underlying response can surface
/// when its headers or body are read.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Network or connection failure while talking to the origin.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// A 3xx result surfaced as an error on an opt-in read.
    #[error("redirection error: status {0}")]
    Redirection(StatusCode),

    /// A 4xx result surfaced as an error on an opt-in read.
    #[error("client error: status {0}")]
    Client(StatusCode),

    /// A 5xx result surfaced as an error on an opt-in read.
    #[error("server error: status {0}")]
    Server(StatusCode),

    /// Body could not be decoded as JSON.
    #[error(transparent)]
    Decoding(Box<dyn std::error::Error + Send + Sync>),
}

impl ResponseError {
    /// Classify a status code into its error kind.
    ///
    /// Returns `None` for the informational and success classes.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_redirection() {
            Some(Self::Redirection(status))
        } else if status.is_client_error() {
            Some(Self::Client(status))
        } else if status.is_server_error() {
            Some(Self::Server(status))
        } else {
            None
        }
    }
}

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A response-level failure raised while the request was processed.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Any other failure raised by an inner client implementation.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
