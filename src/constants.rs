pub const KALSHI_PROD_URL: &str = "https://api.elections.kalshi.com";
pub const KALSHI_DEMO_URL: &str = "https://demo-api.kalshi.co";
pub const KALSHI_API_PREFIX: &str = "/trade-api/v2";

pub const KALSHI_ACCESS_KEY: &str = "KALSHI-ACCESS-KEY";
pub const KALSHI_ACCESS_TIMESTAMP: &str = "KALSHI-ACCESS-TIMESTAMP";
pub const KALSHI_ACCESS_SIGNATURE: &str = "KALSHI-ACCESS-SIGNATURE";

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Binary contracts trade between 1 and 99 cents.
pub const MIN_PRICE_CENTS: u8 = 1;
pub const MAX_PRICE_CENTS: u8 = 99;

pub const HTTP_TIMEOUT_SECS: u64 = 10;
