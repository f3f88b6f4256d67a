//! Example: Fetching public market data from YoBit.
//!
//! Run with: cargo run --example public_data

use yobit_api_client::rest::YobitClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Public endpoints need no credentials
    let client = YobitClient::new();

    println!("=== Info ===");
    let info = client.info().await?;
    println!("Server time: {}", info.server_time);
    println!("Pairs: {}", info.pairs.len());
    if let Some(fee) = client.fee("ltc_btc") {
        println!("ltc_btc fee: {fee}%");
    }

    println!("\n=== Ticker ===");
    let tickers = client.ticker(&["ltc_btc", "eth_btc"]).await?;
    for (pair, ticker) in &tickers {
        println!(
            "{}: last={} buy={} sell={} vol={}",
            pair, ticker.last, ticker.buy, ticker.sell, ticker.vol
        );
    }

    println!("\n=== Depth (ltc_btc, 5 levels) ===");
    let depth = client.depth_limited(&["ltc_btc"], 5).await?;
    if let Some(book) = depth.get("ltc_btc") {
        for ask in book.asks.iter().rev() {
            println!("  ask {} x {}", ask.price, ask.quantity);
        }
        for bid in &book.bids {
            println!("  bid {} x {}", bid.price, bid.quantity);
        }
    }

    println!("\n=== Trades (ltc_btc) ===");
    let trades = client.trades_limited(&["ltc_btc"], 10).await?;
    for trade in trades.get("ltc_btc").into_iter().flatten() {
        println!(
            "  {} {} @ {} ({})",
            trade.trade_type, trade.amount, trade.price, trade.timestamp
        );
    }

    Ok(())
}
