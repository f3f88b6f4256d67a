//! Types for trade API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::auth::format_amount;
use crate::error::YobitError;
use crate::types::serde_helpers::{bool_from_int, u64_from_str_or_int};
use crate::types::{OrderStatus, TradeType};

/// Account balances and API key permissions (`getInfo`).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Permissions granted to the API key.
    pub rights: Rights,
    /// Available balances, excluding funds held by open orders.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
    /// Balances including funds held by open orders.
    #[serde(default)]
    pub funds_incl_orders: HashMap<String, Decimal>,
    /// Number of transactions on the account.
    #[serde(default)]
    pub transaction_count: u64,
    /// Number of open orders.
    #[serde(default)]
    pub open_orders: u64,
    /// Unix timestamp.
    pub server_time: u64,
}

/// API key permissions.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Rights {
    /// Key may read account information.
    #[serde(default, deserialize_with = "bool_from_int::deserialize")]
    pub info: bool,
    /// Key may trade.
    #[serde(default, deserialize_with = "bool_from_int::deserialize")]
    pub trade: bool,
    /// Key may create deposit addresses.
    #[serde(default, deserialize_with = "bool_from_int::deserialize")]
    pub deposit: bool,
    /// Key may withdraw.
    #[serde(default, deserialize_with = "bool_from_int::deserialize")]
    pub withdraw: bool,
}

/// An open order (`ActiveOrders`), keyed by order id in responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveOrder {
    /// Pair name.
    pub pair: String,
    /// Order side.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Remaining amount.
    pub amount: Decimal,
    /// Limit price.
    pub rate: Decimal,
    /// Unix timestamp of creation.
    #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
    pub timestamp_created: u64,
    /// Order status.
    pub status: OrderStatus,
}

/// Details of an order (`OrderInfo`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Pair name.
    pub pair: String,
    /// Order side.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Amount at creation.
    pub start_amount: Decimal,
    /// Remaining amount.
    pub amount: Decimal,
    /// Limit price.
    pub rate: Decimal,
    /// Unix timestamp of creation.
    #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
    pub timestamp_created: u64,
    /// Order status.
    pub status: OrderStatus,
}

impl OrderInfo {
    /// Amount already executed.
    pub fn filled(&self) -> Decimal {
        self.start_amount - self.amount
    }
}

/// An own trade (`TradeHistory`), keyed by trade id in responses.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricTrade {
    /// Pair name.
    pub pair: String,
    /// Trade side.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Executed amount.
    pub amount: Decimal,
    /// Execution price.
    pub rate: Decimal,
    /// Order that produced the trade.
    #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
    pub order_id: u64,
    /// Whether the order was placed by this account.
    #[serde(deserialize_with = "bool_from_int::deserialize")]
    pub is_your_order: bool,
    /// Unix timestamp.
    #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
    pub timestamp: u64,
}

/// Result of placing an order (`Trade`).
#[derive(Debug, Clone, Deserialize)]
pub struct TradeResult {
    /// Amount bought or sold immediately.
    pub received: Decimal,
    /// Amount left on the book.
    pub remains: Decimal,
    /// Id of the resting order, `0` if fully executed.
    pub order_id: u64,
    /// Balances after the trade.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

/// Result of canceling an order (`CancelOrder`).
#[derive(Debug, Clone, Deserialize)]
pub struct CancelResult {
    /// Id of the canceled order.
    #[serde(deserialize_with = "u64_from_str_or_int::deserialize")]
    pub order_id: u64,
    /// Balances after the cancellation.
    #[serde(default)]
    pub funds: HashMap<String, Decimal>,
}

/// Request parameters for placing an order.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    /// Pair name (e.g. `ltc_btc`).
    pub pair: String,
    /// Order side.
    pub trade_type: TradeType,
    /// Limit price.
    pub rate: Decimal,
    /// Order amount.
    pub amount: Decimal,
}

impl TradeRequest {
    /// Create a new limit order request.
    pub fn new(pair: impl Into<String>, trade_type: TradeType, rate: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            trade_type,
            rate,
            amount,
        }
    }

    pub(crate) fn params(&self) -> Result<Vec<(&'static str, String)>, YobitError> {
        Ok(vec![
            ("pair", self.pair.clone()),
            ("type", self.trade_type.to_string()),
            ("rate", format_amount(self.rate)?),
            ("amount", format_amount(self.amount)?),
        ])
    }
}

/// Sort order for trade history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Request parameters for own trade history.
#[derive(Debug, Clone)]
pub struct TradeHistoryRequest {
    /// Pair name.
    pub pair: String,
    /// Maximum number of trades to return.
    pub count: u32,
    /// Skip this many trades.
    pub from: Option<u64>,
    /// Start from this trade id.
    pub from_id: Option<u64>,
    /// Stop at this trade id.
    pub end_id: Option<u64>,
    /// Sort order.
    pub order: Option<SortOrder>,
    /// Unix timestamp lower bound.
    pub since: Option<u64>,
    /// Unix timestamp upper bound.
    pub end: Option<u64>,
}

impl TradeHistoryRequest {
    /// Default number of trades requested.
    pub const DEFAULT_COUNT: u32 = 1000;

    /// Create a request for the last 1000 trades of `pair`.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: Self::DEFAULT_COUNT,
            from: None,
            from_id: None,
            end_id: None,
            order: None,
            since: None,
            end: None,
        }
    }

    /// Set the maximum number of trades.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Start from this trade id.
    pub fn from_id(mut self, id: u64) -> Self {
        self.from_id = Some(id);
        self
    }

    /// Set the sort order.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Restrict to trades within `[since, end]` (Unix seconds).
    pub fn between(mut self, since: u64, end: u64) -> Self {
        self.since = Some(since);
        self.end = Some(end);
        self
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pair", self.pair.clone()),
            ("count", self.count.to_string()),
        ];
        let optional = [
            ("from", self.from),
            ("from_id", self.from_id),
            ("end_id", self.end_id),
            ("since", self.since),
            ("end", self.end),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v.to_string()))),
        );
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }
        params
    }
}
