//! Public API endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::YobitError;
use crate::rest::YobitClient;
use crate::rest::endpoints::public;

impl YobitClient {
    /// Get server time and the settings of every pair.
    ///
    /// The pair list is cached on the client for [`YobitClient::is_market_exists`]
    /// and [`YobitClient::fee`].
    pub async fn info(&self) -> Result<InfoResponse, YobitError> {
        let info: InfoResponse = self.public_get(public::INFO).await?;
        self.cache_pairs(&info.pairs);
        Ok(info)
    }

    /// Get 24h ticker statistics for one or more pairs.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use yobit_api_client::rest::YobitClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = YobitClient::new();
    ///     let tickers = client.ticker(&["ltc_btc", "eth_btc"]).await?;
    ///     for (pair, ticker) in tickers {
    ///         println!("{pair}: {}", ticker.last);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn ticker(&self, pairs: &[&str]) -> Result<HashMap<String, Ticker>, YobitError> {
        let path = format!("{}/{}", public::TICKER, join_pairs("ticker", pairs)?);
        self.public_get(&path).await
    }

    /// Get the order book of one or more pairs, 150 levels deep.
    pub async fn depth(&self, pairs: &[&str]) -> Result<HashMap<String, Offers>, YobitError> {
        self.depth_limited(pairs, public::DEFAULT_DEPTH_LIMIT).await
    }

    /// Get the order book of one or more pairs, `limit` levels deep.
    pub async fn depth_limited(
        &self,
        pairs: &[&str],
        limit: u32,
    ) -> Result<HashMap<String, Offers>, YobitError> {
        let path = format!(
            "{}/{}?limit={}",
            public::DEPTH,
            join_pairs("depth", pairs)?,
            limit
        );
        self.public_get(&path).await
    }

    /// Get up to `limit` recent trades of one or more pairs.
    pub async fn trades_limited(
        &self,
        pairs: &[&str],
        limit: u32,
    ) -> Result<HashMap<String, Vec<PublicTrade>>, YobitError> {
        let path = format!(
            "{}/{}?limit={}",
            public::TRADES,
            join_pairs("trades", pairs)?,
            limit
        );
        self.public_get(&path).await
    }
}

/// Join pair names into YoBit's `a-b-c` path segment.
fn join_pairs(endpoint: &str, pairs: &[&str]) -> Result<String, YobitError> {
    if pairs.is_empty() {
        return Err(YobitError::InvalidRequest(format!(
            "{endpoint}: pair list is empty"
        )));
    }
    if let Some(bad) = pairs
        .iter()
        .find(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
    {
        return Err(YobitError::InvalidRequest(format!(
            "{endpoint}: invalid pair name {bad:?}"
        )));
    }
    Ok(pairs.join("-"))
}
