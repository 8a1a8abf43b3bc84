//! Error types for the DeepL client.
//!
//! Every failed call surfaces exactly one [`DeepLError`]. Transport failures,
//! decoded API errors, malformed payloads and cancellation are kept in
//! distinct variants so callers can tell them apart without string matching.

use std::fmt;
use thiserror::Error;

use crate::transport::{RequestError, TransportError};

/// Result type alias for DeepL operations.
pub type DeepLResult<T> = Result<T, DeepLError>;

/// Error type for DeepL client operations.
#[derive(Debug, Error)]
pub enum DeepLError {
    /// Configuration error (invalid API key, base URL, header value, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Caller input rejected before any request was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
    },

    /// The outbound request could not be prepared.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Transport-level failure, surfaced after retries were exhausted.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response decoded into a structured error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Decode error: {message}")]
    Decode {
        /// Error message from the JSON decoder.
        message: String,
    },

    /// The call's context was cancelled or its deadline passed.
    #[error("Request cancelled: {reason}")]
    Cancelled {
        /// Why the call was cancelled.
        reason: CancelReason,
    },

    /// A single-item helper received an empty list from the API.
    #[error("No results returned by {operation}")]
    EmptyResponse {
        /// The operation that returned nothing.
        operation: &'static str,
    },
}

impl DeepLError {
    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeepLError::Transport(_) => true,
            DeepLError::Api(api) => api.is_rate_limited() || api.is_server_error(),
            _ => false,
        }
    }

    /// Returns the HTTP status if this error came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeepLError::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// Returns true if this is a cancellation or deadline error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeepLError::Cancelled { .. })
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        DeepLError::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        DeepLError::Configuration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DeepLError {
    fn from(err: serde_json::Error) -> Self {
        DeepLError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for DeepLError {
    fn from(err: url::ParseError) -> Self {
        DeepLError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

/// Why a call stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancellation token was triggered.
    Cancelled,
    /// The call's deadline elapsed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("context cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Structured failure decoded from a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable phrase for the status.
    pub status_text: String,
    /// Server-provided message, present only when the body was `{"message": ...}`.
    pub message: Option<String>,
}

/// Error body returned by the DeepL API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error message.
    pub message: Option<String>,
}

impl ApiError {
    /// Builds an error from a response status and its raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ApiErrorResponse>(body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.is_empty());

        Self {
            status,
            status_text: status_text(status),
            message,
        }
    }

    /// Returns true for 456, DeepL's quota-exceeded status.
    pub fn is_quota_exceeded(&self) -> bool {
        self.status == 456
    }

    /// Returns true for 401 and 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Returns true for 429 and 529.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status, 429 | 529)
    }

    /// Returns true for any 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.status_text)?;
        if let Some(message) = &self.message {
            write!(f, " --> {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Returns the phrase used for a status code in error messages.
///
/// DeepL documents specific meanings for a handful of codes; anything else
/// falls back to the canonical reason phrase.
pub fn status_text(status: u16) -> String {
    let known = match status {
        400 => Some("Bad request. Please check error message and your parameters."),
        403 => Some("Authorization failed. Please supply a valid auth_key parameter."),
        404 => Some("The requested resource could not be found."),
        413 => Some("The request size exceeds the limit."),
        414 => Some(
            "The request URL is too long. You can avoid this error by using a POST request instead of a GET request, and sending the parameters in the HTTP body.",
        ),
        429 | 529 => Some("Too many requests. Please wait and resend your request."),
        456 => Some("Quota exceeded. The character limit has been reached."),
        500 => Some("Internal server error."),
        503 => Some("Resource currently unavailable. Try again later."),
        _ => None,
    };

    known
        .or_else(|| {
            http::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
        })
        .unwrap_or("Unknown error")
        .to_string()
}
