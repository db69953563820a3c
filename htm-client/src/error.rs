use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response: connection refused, DNS failure, timeout...
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The engine answered with a non-success status.
    #[error("Remote error: status {status}")]
    Remote { status: u16, body: Option<Value> },

    /// A successful `getData` response that carries no usable `data` sequence.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// True for 4xx responses from the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClientError::Remote { status, .. } if (400..500).contains(status))
    }

    /// True for 5xx responses from the engine.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ClientError::Remote { status, .. } if (500..600).contains(status))
    }
}
