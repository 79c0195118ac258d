//! Kalshi REST client

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::api::KalshiEndpoint;
use super::auth::KalshiAuth;
use super::models::*;
use crate::config::KalshiConfig;
use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::utils::http::decode_response;

/// One method per Kalshi operation. Each call signs, sends and decodes a
/// single request; nothing is cached between calls.
pub struct KalshiClient {
    http: HttpClient,
    auth: Arc<KalshiAuth>,
    base_url: String,
}

impl KalshiClient {
    /// Create a client for the environment selected by `use_demo`.
    pub fn new(config: &KalshiConfig) -> Result<Self> {
        let auth = KalshiAuth::from_config(config)?;
        Self::with_auth(config.rest_url(), Arc::new(auth))
    }

    pub fn with_auth(base_url: &str, auth: Arc<KalshiAuth>) -> Result<Self> {
        url::Url::parse(base_url)?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            auth,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    pub async fn get_balance(&self) -> Result<Balance> {
        self.send(&KalshiEndpoint::Balance, |req| req).await
    }

    pub async fn get_positions(&self, params: &PositionsParams) -> Result<PositionsResponse> {
        self.send(&KalshiEndpoint::Positions, |req| req.query(params))
            .await
    }

    pub async fn get_orders(&self, params: &OrdersParams) -> Result<OrdersResponse> {
        self.send(&KalshiEndpoint::Orders, |req| req.query(params)).await
    }

    // ========================================================================
    // Events & markets
    // ========================================================================

    pub async fn get_events(&self, params: &EventsParams) -> Result<EventsResponse> {
        self.send(&KalshiEndpoint::Events, |req| req.query(params)).await
    }

    /// An unknown event ticker yields an empty list, not an error.
    pub async fn get_markets(&self, params: &MarketsParams) -> Result<MarketsResponse> {
        self.send(&KalshiEndpoint::Markets, |req| req.query(params)).await
    }

    pub async fn get_market(&self, ticker: &str) -> Result<KalshiMarket> {
        require_path_segment("ticker", ticker)?;
        let resp: MarketResponse = self.send(&KalshiEndpoint::Market(ticker), |req| req).await?;
        Ok(resp.market)
    }

    pub async fn get_orderbook(
        &self,
        ticker: &str,
        params: &OrderbookParams,
    ) -> Result<KalshiOrderbook> {
        require_path_segment("ticker", ticker)?;
        let resp: OrderbookResponse = self
            .send(&KalshiEndpoint::Orderbook(ticker), |req| req.query(params))
            .await?;
        Ok(resp.orderbook)
    }

    // ========================================================================
    // Trading
    // ========================================================================

    /// Validates the order locally, then submits it. Invalid orders never
    /// reach the network.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Order> {
        order.validate()?;
        let body = order.to_body();
        let resp: OrderResponse = self
            .send(&KalshiEndpoint::CreateOrder, |req| req.json(&body))
            .await?;
        Ok(resp.order)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelOrderResponse> {
        require_path_segment("order_id", order_id)?;
        self.send(&KalshiEndpoint::CancelOrder(order_id), |req| req)
            .await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    async fn send<T, F>(&self, endpoint: &KalshiEndpoint<'_>, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let method = endpoint.method();
        let path = endpoint.path();
        let url = format!("{}{}", self.base_url, path);
        let auth = self.auth.generate_headers(method.as_str(), &path)?;

        debug!("{} {}", method, path);

        let mut req = self.http.request(method.clone(), &url);
        for (name, value) in auth.to_header_tuples() {
            req = req.header(name, value);
        }

        let resp = build(req).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!("{} {} failed with {}", method, path, status);
        }

        decode_response(status, &body)
    }
}

/// Ids are interpolated into the path, which is also what gets signed, so
/// they must stay a single segment.
fn require_path_segment(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is empty", name)));
    }
    if value.contains(['/', '?', '#']) {
        return Err(Error::Validation(format!(
            "{} must not contain '/', '?' or '#': {}",
            name, value
        )));
    }
    Ok(())
}
