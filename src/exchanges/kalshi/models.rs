use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{MAX_PRICE_CENTS, MIN_PRICE_CENTS};
use crate::error::{Error, Result};

/// Fields the server sent that are not modeled explicitly.
pub type Extra = Map<String, Value>;

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersParams {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

impl Default for OrdersParams {
    fn default() -> Self {
        Self {
            status: "resting".to_string(),
            ticker: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsParams {
    pub limit: u32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Default for EventsParams {
    fn default() -> Self {
        Self {
            limit: 20,
            status: "open".to_string(),
            series_ticker: None,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketsParams {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Default for MarketsParams {
    fn default() -> Self {
        Self {
            limit: 20,
            event_ticker: None,
            series_ticker: None,
            status: None,
            cursor: None,
        }
    }
}

impl MarketsParams {
    pub fn for_event(event_ticker: impl Into<String>) -> Self {
        Self {
            event_ticker: Some(event_ticker.into()),
            ..Self::default()
        }
    }

    pub fn open_in_series(series_ticker: impl Into<String>, limit: u32) -> Self {
        Self {
            limit,
            series_ticker: Some(series_ticker.into()),
            status: Some("open".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderbookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    #[default]
    Market,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Yes => "yes",
            Side::No => "no",
        }
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
        }
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(Side::Yes),
            "no" => Ok(Side::No),
            _ => Err(Error::Validation(format!("Unknown side: {}", s))),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Action::Buy),
            "sell" => Ok(Action::Sell),
            _ => Err(Error::Validation(format!("Unknown action: {}", s))),
        }
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            _ => Err(Error::Validation(format!("Unknown order type: {}", s))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order as the caller describes it, before it reaches the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub ticker: String,
    pub side: Side,
    pub action: Action,
    pub count: u32,
    pub order_type: OrderType,
    /// Price in cents, 1-99.
    pub price: Option<u8>,
}

impl OrderRequest {
    pub fn market(ticker: impl Into<String>, side: Side, action: Action, count: u32) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            action,
            count,
            order_type: OrderType::Market,
            price: None,
        }
    }

    pub fn limit(
        ticker: impl Into<String>,
        side: Side,
        action: Action,
        count: u32,
        price: u8,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            action,
            count,
            order_type: OrderType::Limit,
            price: Some(price),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(Error::Validation("ticker is empty".into()));
        }
        if self.count == 0 {
            return Err(Error::Validation("count must be at least 1".into()));
        }
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(Error::Validation("limit orders require a price".into()));
        }
        if let Some(price) = self.price {
            if !(MIN_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&price) {
                return Err(Error::Validation(format!(
                    "price must be between {} and {} cents, got {}",
                    MIN_PRICE_CENTS, MAX_PRICE_CENTS, price
                )));
            }
        }
        Ok(())
    }

    /// Wire body for `POST /portfolio/orders`. The price goes to the field
    /// matching the order side.
    pub fn to_body(&self) -> CreateOrderBody {
        let price = match self.order_type {
            OrderType::Limit => self.price,
            OrderType::Market => None,
        };

        CreateOrderBody {
            ticker: self.ticker.clone(),
            side: self.side,
            action: self.action,
            count: self.count,
            order_type: self.order_type,
            yes_price: price.filter(|_| self.side == Side::Yes),
            no_price: price.filter(|_| self.side == Side::No),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrderBody {
    pub ticker: String,
    pub side: Side,
    pub action: Action,
    pub count: u32,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yes_price: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_price: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default, rename = "type")]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub yes_price: Option<i64>,
    #[serde(default)]
    pub no_price: Option<i64>,
    #[serde(default)]
    pub remaining_count: Option<i64>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CancelOrderResponse {
    pub order: Order,
    #[serde(default)]
    pub reduced_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ============================================================================
// Portfolio
// ============================================================================

/// Account balance, in integer cents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Balance {
    pub balance: i64,
    #[serde(default)]
    pub portfolio_value: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketPosition {
    pub ticker: String,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub market_exposure: Option<i64>,
    #[serde(default)]
    pub realized_pnl: Option<i64>,
    #[serde(default)]
    pub resting_orders_count: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventPosition {
    pub event_ticker: String,
    #[serde(default)]
    pub event_exposure: Option<i64>,
    #[serde(default)]
    pub realized_pnl: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionsResponse {
    #[serde(default)]
    pub market_positions: Vec<MarketPosition>,
    #[serde(default)]
    pub event_positions: Vec<EventPosition>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ============================================================================
// Events & markets
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiEvent {
    pub event_ticker: String,
    #[serde(default)]
    pub series_ticker: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<KalshiEvent>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiMarket {
    pub ticker: String,
    #[serde(default)]
    pub event_ticker: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub yes_sub_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    /// Best bid/ask in cents.
    #[serde(default)]
    pub yes_bid: Option<i64>,
    #[serde(default)]
    pub yes_ask: Option<i64>,
    #[serde(default)]
    pub no_bid: Option<i64>,
    #[serde(default)]
    pub no_ask: Option<i64>,
    #[serde(default)]
    pub last_price: Option<i64>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub volume_24h: Option<i64>,
    #[serde(default)]
    pub open_interest: Option<i64>,
    #[serde(default)]
    pub floor_strike: Option<f64>,
    #[serde(default)]
    pub cap_strike: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl KalshiMarket {
    /// A bid outside 1-99 is treated as 0, i.e. no bid.
    pub fn yes_bid_cents(&self) -> i64 {
        self.yes_bid.filter(is_tradable_price).unwrap_or(0)
    }

    /// A missing ask, or one outside 1-99, is treated as 100, i.e. nothing
    /// offered.
    pub fn yes_ask_cents(&self) -> i64 {
        self.yes_ask.filter(is_tradable_price).unwrap_or(100)
    }

    pub fn has_live_quote(&self) -> bool {
        self.yes_bid_cents() > 0 || self.yes_ask_cents() < 100
    }
}

fn is_tradable_price(cents: &i64) -> bool {
    (i64::from(MIN_PRICE_CENTS)..=i64::from(MAX_PRICE_CENTS)).contains(cents)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketResponse {
    pub market: KalshiMarket,
}

/// Resting bids by side, as `[price_cents, quantity]` pairs. Kalshi sends
/// `null` for an empty side.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KalshiOrderbook {
    #[serde(default)]
    pub yes: Option<Vec<OrderbookLevel>>,
    #[serde(default)]
    pub no: Option<Vec<OrderbookLevel>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderbookLevel(pub i64, pub i64);

impl OrderbookLevel {
    pub fn price(&self) -> i64 {
        self.0
    }

    pub fn quantity(&self) -> i64 {
        self.1
    }
}

impl KalshiOrderbook {
    pub fn yes_levels(&self) -> &[OrderbookLevel] {
        self.yes.as_deref().unwrap_or_default()
    }

    pub fn no_levels(&self) -> &[OrderbookLevel] {
        self.no.as_deref().unwrap_or_default()
    }

    pub fn best_yes_bid(&self) -> Option<i64> {
        self.yes_levels().iter().map(OrderbookLevel::price).max()
    }

    pub fn best_no_bid(&self) -> Option<i64> {
        self.no_levels().iter().map(OrderbookLevel::price).max()
    }

    /// A YES ask is implied by the best NO bid.
    pub fn implied_yes_ask(&self) -> Option<i64> {
        self.best_no_bid().map(|no| 100 - no)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderbookResponse {
    pub orderbook: KalshiOrderbook,
}
