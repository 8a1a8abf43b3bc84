//! HTTP transport layer for the DeepL client.
//!
//! Provides the request/response representation, the transport trait the
//! executor sends through, a reqwest-backed implementation, and a tracing
//! decorator that dumps every exchange for debugging.

mod http;
mod request;
mod trace;

pub use http::{HttpTransport, ReqwestTransport};
pub use request::{
    BodyStream, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestError,
};
pub use trace::TracingTransport;

/// Transport error types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection could not be established (DNS, refused, TLS handshake).
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The request timed out.
    #[error("Timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The request could not be built or its body could not be sent.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The response could not be read.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() || err.is_request() {
            TransportError::InvalidRequest {
                message: err.to_string(),
            }
        } else {
            TransportError::InvalidResponse {
                message: err.to_string(),
            }
        }
    }
}
