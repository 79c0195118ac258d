use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AssetConfig;
use crate::error::Result;
use crate::exchanges::kalshi::{KalshiClient, KalshiMarket, MarketsParams};

/// Spot price of one asset at the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub change_24h: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Source of spot prices.
#[async_trait]
pub trait SpotPriceFeed {
    /// One quote per asset the feed knows a price for. Assets it has no price
    /// for are omitted.
    async fn fetch_quotes(&self, assets: &[AssetConfig]) -> Result<Vec<PriceQuote>>;
}

/// Source of Kalshi market listings.
#[async_trait]
pub trait MarketSource {
    async fn open_markets(&self, series_ticker: &str, limit: u32) -> Result<Vec<KalshiMarket>>;
}

#[async_trait]
impl MarketSource for KalshiClient {
    async fn open_markets(&self, series_ticker: &str, limit: u32) -> Result<Vec<KalshiMarket>> {
        let params = MarketsParams::open_in_series(series_ticker, limit);
        Ok(self.get_markets(&params).await?.markets)
    }
}
