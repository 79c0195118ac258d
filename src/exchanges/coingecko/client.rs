//! CoinGecko spot price client (unauthenticated)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{quotes_from_response, SimplePriceResponse};
use crate::config::AssetConfig;
use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::utils::http::decode_response;
use crate::exchanges::{PriceQuote, SpotPriceFeed};

pub struct CoinGeckoClient {
    http: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str) -> Result<Self> {
        url::Url::parse(base_url)?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn simple_price(&self, coin_ids: &[&str]) -> Result<SimplePriceResponse> {
        let url = format!("{}/simple/price", self.base_url);
        let ids = coin_ids.join(",");
        debug!("GET {} ids={}", url, ids);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("ids", ids.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl SpotPriceFeed for CoinGeckoClient {
    async fn fetch_quotes(&self, assets: &[AssetConfig]) -> Result<Vec<PriceQuote>> {
        let ids: Vec<&str> = assets.iter().map(|a| a.coingecko_id.as_str()).collect();
        let response = self.simple_price(&ids).await?;
        Ok(quotes_from_response(&response, assets, chrono::Utc::now()))
    }
}
