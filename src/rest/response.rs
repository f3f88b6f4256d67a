//! Decoding of YoBit response bodies.
//!
//! Public endpoints return the payload directly; the trade API wraps it in
//! `{"success":1,"return":...}`. Both report failures as
//! `{"success":0,"error":"..."}`, which is surfaced as [`YobitError::Api`]
//! instead of a raw parse failure.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, YobitError};

/// Minimal error shape shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    success: u8,
    #[serde(default)]
    error: Option<String>,
}

/// Trade API envelope.
#[derive(Debug, Deserialize)]
struct PrivateEnvelope<T> {
    #[serde(default)]
    success: u8,
    #[serde(rename = "return")]
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode a body into `T`.
///
/// If `T` does not match, the body is retried as an error response and the
/// server's message returned as [`YobitError::Api`]. Anything else becomes
/// [`YobitError::InvalidResponse`] carrying the parse error and body.
///
/// ```rust
/// use std::collections::HashMap;
/// use yobit_api_client::rest::decode;
///
/// let err = decode::<HashMap<String, u64>>(br#"{"success":0,"error":"invalid nonce"}"#).unwrap_err();
/// assert_eq!(err.api_error().unwrap().message, "invalid nonce");
/// ```
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, YobitError> {
    serde_json::from_slice(body).map_err(|e| {
        api_error(body).unwrap_or_else(|| {
            YobitError::InvalidResponse(format!(
                "Failed to parse response: {}. Body: {}",
                e,
                String::from_utf8_lossy(body)
            ))
        })
    })
}

/// Decode a trade API envelope, returning its `return` payload if present.
///
/// Some methods (for example `ActiveOrders` with no open orders) answer
/// `{"success":1}` with no payload at all.
pub fn decode_private_optional<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, YobitError> {
    let envelope: PrivateEnvelope<T> = decode(body)?;
    if envelope.success == 0 {
        let message = envelope
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "request failed without an error message".to_string());
        return Err(YobitError::Api(ApiError::new(message)));
    }
    Ok(envelope.result)
}

/// Decode a trade API envelope whose `return` payload is mandatory.
pub fn decode_private<T: DeserializeOwned>(body: &[u8]) -> Result<T, YobitError> {
    decode_private_optional(body)?.ok_or_else(|| {
        YobitError::InvalidResponse(format!(
            "Response missing 'return' field. Body: {}",
            String::from_utf8_lossy(body)
        ))
    })
}

fn api_error(body: &[u8]) -> Option<YobitError> {
    let parsed: ErrorResponse = serde_json::from_slice(body).ok()?;
    match parsed.error {
        Some(message) if parsed.success == 0 && !message.is_empty() => {
            Some(YobitError::Api(ApiError::new(message)))
        }
        _ => None,
    }
}
