//! YoBit API endpoint constants.

/// Base URL for the YoBit API.
pub const YOBIT_BASE_URL: &str = "https://yobit.net";

/// Trade API path. Every authenticated method is a POST here.
pub const TRADE_API: &str = "/tapi/";

/// Public endpoints (no authentication required).
pub mod public {
    /// Server time and pair settings.
    pub const INFO: &str = "/api/3/info";
    /// 24h ticker statistics.
    pub const TICKER: &str = "/api/3/ticker";
    /// Order book.
    pub const DEPTH: &str = "/api/3/depth";
    /// Recent public trades.
    pub const TRADES: &str = "/api/3/trades";

    /// Order book depth used by `depth`.
    pub const DEFAULT_DEPTH_LIMIT: u32 = 150;
}

/// Trade API method names (authentication required).
pub mod private {
    /// Balances and key permissions.
    pub const GET_INFO: &str = "getInfo";
    /// Open orders for a pair.
    pub const ACTIVE_ORDERS: &str = "ActiveOrders";
    /// Details of a single order.
    pub const ORDER_INFO: &str = "OrderInfo";
    /// Place an order.
    pub const TRADE: &str = "Trade";
    /// Cancel an order.
    pub const CANCEL_ORDER: &str = "CancelOrder";
    /// Own trade history for a pair.
    pub const TRADE_HISTORY: &str = "TradeHistory";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths_use_api_v3() {
        for path in [public::INFO, public::TICKER, public::DEPTH, public::TRADES] {
            assert!(path.starts_with("/api/3/"), "{path}");
        }
        assert_eq!(TRADE_API, "/tapi/");
    }
}
