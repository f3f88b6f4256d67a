//! YoBit REST API client.
//!
//! [`YobitClient`] exposes the public market data endpoints (`info`,
//! `ticker`, `depth`, `trades`) and the trade API (`getInfo`, `Trade`,
//! `CancelOrder`, ...). Response bodies are decoded by [`decode`] and
//! friends, which turn YoBit's `{"success":0,"error":...}` answers into
//! [`YobitError::Api`](crate::YobitError::Api).

mod client;
mod endpoints;
pub mod private;
pub mod public;
mod response;

pub use client::{DEFAULT_TIMEOUT, YobitClient, YobitClientBuilder};
pub use endpoints::*;
pub use response::{decode, decode_private, decode_private_optional};
