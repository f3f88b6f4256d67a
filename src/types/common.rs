//! Common domain types for the YoBit API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Buy order
    #[serde(alias = "bid")]
    Buy,
    /// Sell order
    #[serde(alias = "ask")]
    Sell,
}

impl TradeType {
    /// Wire name used in trade API parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "buy",
            TradeType::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an order, sent by YoBit as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderStatus {
    /// Order is open and active
    Active,
    /// Order has been completely filled
    Filled,
    /// Order has been canceled
    Canceled,
    /// Order was canceled after being partially filled
    CanceledPartiallyFilled,
}

impl TryFrom<u8> for OrderStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderStatus::Active),
            1 => Ok(OrderStatus::Filled),
            2 => Ok(OrderStatus::Canceled),
            3 => Ok(OrderStatus::CanceledPartiallyFilled),
            other => Err(format!("unknown order status {other}")),
        }
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Active => 0,
            OrderStatus::Filled => 1,
            OrderStatus::Canceled => 2,
            OrderStatus::CanceledPartiallyFilled => 3,
        }
    }
}

impl OrderStatus {
    /// Whether the order can still be filled.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Active)
    }
}
