use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::constants::DEFAULT_CONFIG_PATH;
use crate::error::Result;
use crate::exchanges::kalshi::{
    Action, EventsParams, KalshiClient, MarketsParams, OrderRequest, OrderType, OrderbookParams,
    OrdersParams, PositionsParams, Side,
};

#[derive(Debug, Parser)]
#[command(name = "kalshi", about = "Kalshi trading API client", version)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(long, env = "KALSHI_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Account balance in cents
    Balance,
    /// Open positions
    Positions,
    /// Orders with the given status
    Orders {
        #[arg(long, default_value = "resting")]
        status: String,
    },
    /// Events
    Events {
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value = "open")]
        status: String,
    },
    /// Markets, optionally for one event
    Markets {
        event_ticker: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// A single market
    Market { ticker: String },
    /// Orderbook for a market
    Orderbook { ticker: String },
    /// Place an order
    Order {
        ticker: String,
        #[arg(value_parser = parse_side)]
        side: Side,
        #[arg(value_parser = parse_action)]
        action: Action,
        count: u32,
        #[arg(long = "type", value_parser = parse_order_type, default_value = "market")]
        order_type: OrderType,
        /// Limit price in cents (1-99)
        #[arg(long)]
        price: Option<u8>,
    },
    /// Cancel an order
    Cancel { order_id: String },
}

fn parse_side(s: &str) -> std::result::Result<Side, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_action(s: &str) -> std::result::Result<Action, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_order_type(s: &str) -> std::result::Result<OrderType, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

/// Runs one command and returns the response as pretty JSON.
pub async fn run(command: Command, client: &KalshiClient) -> Result<String> {
    match command {
        Command::Balance => to_json(&client.get_balance().await?),
        Command::Positions => to_json(&client.get_positions(&PositionsParams::default()).await?),
        Command::Orders { status } => {
            let params = OrdersParams {
                status,
                ..OrdersParams::default()
            };
            to_json(&client.get_orders(&params).await?)
        }
        Command::Events { limit, status } => {
            let params = EventsParams {
                limit,
                status,
                ..EventsParams::default()
            };
            to_json(&client.get_events(&params).await?)
        }
        Command::Markets {
            event_ticker,
            limit,
        } => {
            let params = MarketsParams {
                limit,
                event_ticker,
                ..MarketsParams::default()
            };
            to_json(&client.get_markets(&params).await?)
        }
        Command::Market { ticker } => to_json(&client.get_market(&ticker).await?),
        Command::Orderbook { ticker } => {
            to_json(&client.get_orderbook(&ticker, &OrderbookParams::default()).await?)
        }
        Command::Order {
            ticker,
            side,
            action,
            count,
            order_type,
            price,
        } => {
            let order = OrderRequest {
                ticker,
                side,
                action,
                count,
                order_type,
                price,
            };
            let placed = client.place_order(&order).await?;
            info!("Placed order {}", placed.order_id);
            to_json(&placed)
        }
        Command::Cancel { order_id } => {
            let cancelled = client.cancel_order(&order_id).await?;
            info!("Cancelled order {}", order_id);
            to_json(&cancelled)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
