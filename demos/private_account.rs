//! Example: Trade API account endpoints.
//!
//! The nonce counter and session cookies are kept in `YOBIT_DATA_DIR`
//! (default `data`), so consecutive runs keep using increasing nonces.
//!
//! Run with: cargo run --example private_account

use std::env;
use std::sync::Arc;

use yobit_api_client::auth::EnvCredentials;
use yobit_api_client::rest::YobitClient;
use yobit_api_client::rest::private::TradeHistoryRequest;
use yobit_api_client::storage::FileStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set YOBIT_API_KEY and YOBIT_API_SECRET to run this example.");
            return Ok(());
        }
    };
    let data_dir = env::var("YOBIT_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let pair = env::var("YOBIT_PAIR").unwrap_or_else(|_| "ltc_btc".to_string());

    let client = YobitClient::builder()
        .credentials(credentials)
        .storage(Arc::new(FileStorage::open(&data_dir)?))
        .user_agent("yobit-api-client-examples/private_account")
        .build();

    client.handshake().await?;

    println!("=== Account ===");
    let info = client.get_info().await?;
    println!(
        "Rights: info={} trade={} withdraw={}",
        info.rights.info, info.rights.trade, info.rights.withdraw
    );
    for (asset, amount) in info.funds.iter().filter(|(_, a)| !a.is_zero()) {
        println!("  {asset}: {amount}");
    }

    println!("\n=== Active Orders ({pair}) ===");
    let orders = client.active_orders(&pair).await?;
    for (id, order) in &orders {
        println!(
            "  #{id} {} {} @ {} ({:?})",
            order.trade_type, order.amount, order.rate, order.status
        );
    }

    println!("\n=== Trade History ({pair}) ===");
    let trades = client
        .trade_history(&TradeHistoryRequest::new(pair.as_str()).count(20))
        .await?;
    println!("Trades: {}", trades.len());

    Ok(())
}
