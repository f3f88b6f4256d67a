//! Error types for the YoBit client library.
//!
//! Errors fall into three groups:
//! - configuration and storage errors (nonce file unreadable, corrupt or unwritable),
//! - protocol errors (the exchange answered with `success: 0`),
//! - transport errors (network failures, non-OK HTTP status, undecodable bodies).
//!
//! All of them are terminal for the call that raised them. None are retried.

use thiserror::Error;

/// The main error type for all YoBit client operations.
#[derive(Error, Debug)]
pub enum YobitError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The server answered with a non-OK HTTP status.
    #[error("{url}: unexpected HTTP status {status}")]
    HttpStatus {
        /// Request URL
        url: String,
        /// Status code returned by the server
        status: u16,
        /// Raw response body
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// YoBit API returned an error
    #[error("YoBit API error: {0}")]
    Api(ApiError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for the trade API")]
    MissingCredentials,

    /// Client or credential configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage could not be read or written.
    #[error("storage error on key '{key}': {source}")]
    Storage {
        /// Storage key being accessed
        key: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The persisted nonce is not a positive decimal integer.
    #[error("nonce under key '{key}' is corrupt: {value:?}")]
    CorruptNonce {
        /// Storage key holding the counter
        key: String,
        /// Raw stored contents
        value: String,
    },

    /// The nonce counter reached `u64::MAX`.
    #[error("nonce under key '{key}' is exhausted")]
    NonceExhausted {
        /// Storage key holding the counter
        key: String,
    },
}

impl YobitError {
    /// Build a storage error for `key`.
    pub(crate) fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            key: key.into(),
            source,
        }
    }

    /// The exchange-side error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// An error reported by YoBit in the response body.
///
/// YoBit signals failures with `{"success":0,"error":"<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Server-supplied message, verbatim.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Create a new API error from the server message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.message.to_ascii_lowercase().contains(needle)
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.contains("invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.contains("invalid key") || self.contains("api key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.contains("invalid sign")
    }

    /// Check if the account lacks funds for the order.
    pub fn is_insufficient_funds(&self) -> bool {
        self.contains("insufficient funds")
    }
}
