pub mod coingecko;
pub mod kalshi;
pub mod traits;

pub use traits::{MarketSource, PriceQuote, SpotPriceFeed};
