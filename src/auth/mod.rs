//! Authentication module for the YoBit trade API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - A durable nonce counter for replay attack prevention
//! - HMAC-SHA512 signing of trade API request bodies

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{DEFAULT_NONCE_KEY, NonceProvider, PersistentNonce};
pub use signature::{
    KEY_HEADER, SIGN_HEADER, SignedRequest, build_authenticated_call, format_amount, sign,
    sign_request,
};
