//! Live tests against the Kalshi demo environment.
//!
//! These need a demo account and are ignored by default. Point
//! `KALSHI_CONFIG` at a config with `"use_demo": true` and run:
//!
//! ```text
//! cargo test --test demo_integration -- --ignored --test-threads=1
//! ```
//!
//! `KALSHI_TEST_TICKER` selects the market used for the order round trip.

use kalshi_trader::exchanges::kalshi::{
    Action, KalshiClient, MarketsParams, OrderRequest, OrdersParams, Side,
};
use kalshi_trader::{Config, Error};

fn demo_client() -> KalshiClient {
    let config = Config::from_env().expect("KALSHI_CONFIG must point at a demo config");
    assert!(config.kalshi.use_demo, "refusing to run live tests against production");
    KalshiClient::new(&config.kalshi).expect("client")
}

#[tokio::test]
#[ignore]
async fn balance_is_integer_cents() {
    let balance = demo_client().get_balance().await.unwrap();
    assert!(balance.balance >= 0);
}

#[tokio::test]
#[ignore]
async fn unknown_event_ticker_returns_no_markets() {
    let params = MarketsParams::for_event("NO-SUCH-EVENT-0000");
    let resp = demo_client().get_markets(&params).await.unwrap();
    assert!(resp.markets.is_empty());
}

#[tokio::test]
#[ignore]
async fn unknown_market_is_api_error() {
    let err = demo_client().get_market("NO-SUCH-MARKET-0000").await.unwrap_err();
    assert!(matches!(err, Error::Api { .. }), "got {:?}", err);
}

#[tokio::test]
#[ignore]
async fn place_then_cancel_removes_resting_order() {
    let client = demo_client();
    let ticker = std::env::var("KALSHI_TEST_TICKER").expect("KALSHI_TEST_TICKER not set");

    // A 1 cent YES bid rests without filling.
    let order = OrderRequest::limit(ticker, Side::Yes, Action::Buy, 1, 1);
    let placed = client.place_order(&order).await.unwrap();
    assert!(!placed.order_id.is_empty());

    client.cancel_order(&placed.order_id).await.unwrap();

    let resting = client.get_orders(&OrdersParams::default()).await.unwrap();
    assert!(resting.orders.iter().all(|o| o.order_id != placed.order_id));
}
