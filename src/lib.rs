//! # YoBit Client
//!
//! An async Rust client library for the YoBit exchange public and trade APIs.
//!
//! ## Features
//!
//! - Public market data: pair info, tickers, order books, recent trades
//! - Trade API: balances, order placement and cancellation, trade history
//! - Durable, strictly increasing nonces that survive restarts
//! - HMAC-SHA512 request signing
//! - Session cookie persistence for anti-bot fronts
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yobit_api_client::rest::YobitClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YobitClient::new();
//!     let info = client.info().await?;
//!     println!("Server time: {}, {} pairs", info.server_time, info.pairs.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cookies;
pub mod error;
pub mod rest;
pub mod storage;
pub mod types;

// Re-export commonly used types at crate root
pub use error::YobitError;
pub use rest::YobitClient;
pub use types::common::{OrderStatus, TradeType};

/// Result type alias using YobitError
pub type Result<T> = std::result::Result<T, YobitError>;
