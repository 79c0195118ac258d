use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AssetConfig;
use crate::exchanges::PriceQuote;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CoinGeckoPrice {
    pub usd: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
}

/// `/simple/price` body, keyed by coin id (`bitcoin`, `ethereum`, ...).
pub type SimplePriceResponse = HashMap<String, CoinGeckoPrice>;

/// Turns a `/simple/price` body into quotes, in the order of `assets`.
/// Coins with no USD price are skipped.
pub fn quotes_from_response(
    response: &SimplePriceResponse,
    assets: &[AssetConfig],
    timestamp: DateTime<Utc>,
) -> Vec<PriceQuote> {
    assets
        .iter()
        .filter_map(|asset| {
            let entry = response.get(&asset.coingecko_id)?;
            Some(PriceQuote {
                symbol: asset.symbol.clone(),
                price: entry.usd?,
                change_24h: entry.usd_24h_change,
                timestamp,
            })
        })
        .collect()
}
