//! Trade API endpoints (authentication required).
//!
//! These endpoints require API credentials and a nonce provider to be
//! configured on the client.

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::YobitError;
use crate::rest::YobitClient;
use crate::rest::endpoints::private;

impl YobitClient {
    /// Get balances and API key permissions.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use yobit_api_client::auth::StaticCredentials;
    /// use yobit_api_client::rest::YobitClient;
    /// use yobit_api_client::storage::FileStorage;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = YobitClient::builder()
    ///         .credentials(Arc::new(StaticCredentials::new("key", "secret")))
    ///         .storage(Arc::new(FileStorage::open("data")?))
    ///         .build();
    ///
    ///     let info = client.get_info().await?;
    ///     for (asset, amount) in info.funds {
    ///         println!("{asset}: {amount}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_info(&self) -> Result<AccountInfo, YobitError> {
        self.private_post(private::GET_INFO, Vec::new())
            .await?
            .ok_or_else(|| missing_return(private::GET_INFO))
    }

    /// Get open orders for a pair, keyed by order id.
    pub async fn active_orders(
        &self,
        pair: &str,
    ) -> Result<HashMap<String, ActiveOrder>, YobitError> {
        let orders = self
            .private_post(private::ACTIVE_ORDERS, vec![("pair", pair.to_string())])
            .await?;
        Ok(orders.unwrap_or_default())
    }

    /// Get details of an order, keyed by order id.
    pub async fn order_info(
        &self,
        order_id: &str,
    ) -> Result<HashMap<String, OrderInfo>, YobitError> {
        self.private_post(private::ORDER_INFO, vec![("order_id", order_id.to_string())])
            .await?
            .ok_or_else(|| missing_return(private::ORDER_INFO))
    }

    /// Place a limit order.
    ///
    /// Rate and amount are sent with 8 fractional digits.
    pub async fn trade(&self, request: &TradeRequest) -> Result<TradeResult, YobitError> {
        self.private_post(private::TRADE, request.params()?)
            .await?
            .ok_or_else(|| missing_return(private::TRADE))
    }

    /// Cancel an order.
    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelResult, YobitError> {
        self.private_post(private::CANCEL_ORDER, vec![("order_id", order_id.to_string())])
            .await?
            .ok_or_else(|| missing_return(private::CANCEL_ORDER))
    }

    /// Get own trades, keyed by trade id.
    pub async fn trade_history(
        &self,
        request: &TradeHistoryRequest,
    ) -> Result<HashMap<String, HistoricTrade>, YobitError> {
        let trades = self
            .private_post(private::TRADE_HISTORY, request.params())
            .await?;
        Ok(trades.unwrap_or_default())
    }
}

fn missing_return(method: &str) -> YobitError {
    YobitError::InvalidResponse(format!("{method}: response missing 'return' field"))
}
