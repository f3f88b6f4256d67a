//! Types for public API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::types::TradeType;
use crate::types::serde_helpers::bool_from_int;

/// Server time and pair settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    /// Unix timestamp.
    pub server_time: u64,
    /// Settings of every listed pair, keyed by pair name (e.g. `ltc_btc`).
    pub pairs: HashMap<String, PairInfo>,
}

/// Trading settings of a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct PairInfo {
    /// Number of decimal places allowed in prices.
    pub decimal_places: u32,
    /// Minimum allowed price.
    pub min_price: Decimal,
    /// Maximum allowed price.
    pub max_price: Decimal,
    /// Minimum order amount.
    pub min_amount: Decimal,
    /// Minimum order total.
    #[serde(default)]
    pub min_total: Option<Decimal>,
    /// Whether the pair is hidden from listings.
    #[serde(deserialize_with = "bool_from_int::deserialize")]
    pub hidden: bool,
    /// Taker fee in percent.
    pub fee: Decimal,
    /// Buyer fee in percent.
    #[serde(default)]
    pub fee_buyer: Option<Decimal>,
    /// Seller fee in percent.
    #[serde(default)]
    pub fee_seller: Option<Decimal>,
}

/// 24h ticker statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Average price.
    pub avg: Decimal,
    /// Volume in quote currency.
    pub vol: Decimal,
    /// Volume in base currency.
    pub vol_cur: Decimal,
    /// Last trade price.
    pub last: Decimal,
    /// Best bid.
    pub buy: Decimal,
    /// Best ask.
    pub sell: Decimal,
    /// Unix timestamp of the last update.
    pub updated: u64,
}

/// Order book of a pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Offers {
    /// Sell offers, best first.
    #[serde(default)]
    pub asks: Vec<Offer>,
    /// Buy offers, best first.
    #[serde(default)]
    pub bids: Vec<Offer>,
}

impl Offers {
    /// Best (lowest) ask.
    pub fn best_ask(&self) -> Option<&Offer> {
        self.asks.first()
    }

    /// Best (highest) bid.
    pub fn best_bid(&self) -> Option<&Offer> {
        self.bids.first()
    }
}

/// One order book level, sent as `[price, quantity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(Decimal, Decimal)")]
pub struct Offer {
    /// Price level.
    pub price: Decimal,
    /// Quantity at this level.
    pub quantity: Decimal,
}

impl From<(Decimal, Decimal)> for Offer {
    fn from((price, quantity): (Decimal, Decimal)) -> Self {
        Self { price, quantity }
    }
}

/// A public trade.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicTrade {
    /// Taker side.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Trade price.
    pub price: Decimal,
    /// Trade amount.
    pub amount: Decimal,
    /// Trade id.
    pub tid: u64,
    /// Unix timestamp.
    pub timestamp: u64,
}
