//! HMAC-SHA512 signature generation for YoBit trade API authentication.
//!
//! Trade API calls are `POST /tapi/` with a form body that embeds both the
//! method name and the nonce. The signature is:
//! ```text
//! hex(HMAC-SHA512(body, api_secret))
//! ```
//! sent in the `Sign` header, alongside the API key in the `Key` header.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha512;

use crate::auth::{Credentials, NonceProvider};
use crate::error::YobitError;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the API key.
pub const KEY_HEADER: &str = "Key";
/// Header carrying the body signature.
pub const SIGN_HEADER: &str = "Sign";

/// Fractional digits of rates and amounts sent to the trade API.
const AMOUNT_SCALE: u32 = 8;

/// Sign `body` with `secret`.
///
/// Returns the lowercase hex encoding of the 64-byte HMAC-SHA512 digest.
///
/// # Example
///
/// ```rust
/// use yobit_api_client::auth::sign;
///
/// let signature = sign(b"abc", b"method=Trade&nonce=1").unwrap();
/// assert_eq!(signature.len(), 128);
/// ```
pub fn sign(secret: &[u8], body: &[u8]) -> Result<String, YobitError> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| YobitError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign a request body with the credential's secret.
pub fn sign_request(credentials: &Credentials, body: &str) -> Result<String, YobitError> {
    sign(credentials.expose_secret().as_bytes(), body.as_bytes())
}

/// Format a monetary quantity the way the trade API expects: fixed point
/// with exactly 8 fractional digits.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use yobit_api_client::auth::format_amount;
///
/// assert_eq!(format_amount(Decimal::new(15, 1)).unwrap(), "1.50000000");
/// ```
///
/// Values too large to carry 8 fractional digits in a [`Decimal`] are
/// rejected with [`YobitError::InvalidRequest`].
pub fn format_amount(value: Decimal) -> Result<String, YobitError> {
    let mut scaled = value;
    scaled.rescale(AMOUNT_SCALE);
    if scaled.scale() != AMOUNT_SCALE {
        return Err(YobitError::InvalidRequest(format!(
            "amount {value} cannot be sent with {AMOUNT_SCALE} fractional digits"
        )));
    }
    Ok(scaled.to_string())
}

/// A fully signed trade API call, ready to send.
///
/// Only valid for a single request: the nonce inside `body` is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Trade API method name (e.g. `Trade`).
    pub method: String,
    /// Nonce embedded in `body`.
    pub nonce: u64,
    /// URL-encoded form body, byte-for-byte what must be transmitted.
    pub body: String,
    /// Hex HMAC-SHA512 of `body`.
    pub signature: String,
    /// Public API key for the `Key` header.
    pub api_key: String,
}

/// Build and sign a trade API call.
///
/// Takes the next nonce from `nonce_provider`, encodes `method`, `nonce` and
/// `params` as a form body sorted by parameter name (parameters sharing a
/// name keep their relative order), and signs exactly that body.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yobit_api_client::auth::{Credentials, PersistentNonce, build_authenticated_call};
/// use yobit_api_client::storage::MemoryStorage;
///
/// # fn main() -> Result<(), yobit_api_client::YobitError> {
/// let credentials = Credentials::new("key", "secret");
/// let nonce = PersistentNonce::new(Arc::new(MemoryStorage::new()));
/// let call = build_authenticated_call(&credentials, &nonce, "ActiveOrders", [("pair", "ltc_btc")])?;
/// assert_eq!(call.body, "method=ActiveOrders&nonce=1&pair=ltc_btc");
/// # Ok(())
/// # }
/// ```
pub fn build_authenticated_call<I, K, V>(
    credentials: &Credentials,
    nonce_provider: &dyn NonceProvider,
    method: &str,
    params: I,
) -> Result<SignedRequest, YobitError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut fields: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    if let Some((name, _)) = fields.iter().find(|(k, _)| k == "method" || k == "nonce") {
        return Err(YobitError::InvalidRequest(format!(
            "parameter '{name}' is reserved"
        )));
    }

    let nonce = nonce_provider.next_nonce()?;
    fields.push(("method".to_string(), method.to_string()));
    fields.push(("nonce".to_string(), nonce.to_string()));
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let body = serde_urlencoded::to_string(&fields)
        .map_err(|e| YobitError::InvalidRequest(e.to_string()))?;
    let signature = sign_request(credentials, &body)?;

    Ok(SignedRequest {
        method: method.to_string(),
        nonce,
        body,
        signature,
        api_key: credentials.api_key.clone(),
    })
}
