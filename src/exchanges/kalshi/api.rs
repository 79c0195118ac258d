//! Kalshi REST endpoints: HTTP method and path for each operation.

use reqwest::Method;

use crate::constants::KALSHI_API_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KalshiEndpoint<'a> {
    Balance,
    Positions,
    Orders,
    CreateOrder,
    CancelOrder(&'a str),
    Events,
    Markets,
    Market(&'a str),
    Orderbook(&'a str),
}

impl KalshiEndpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            KalshiEndpoint::CreateOrder => Method::POST,
            KalshiEndpoint::CancelOrder(_) => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Full path including the API prefix. This is also the signed path.
    pub fn path(&self) -> String {
        let suffix = match self {
            KalshiEndpoint::Balance => "/portfolio/balance".to_string(),
            KalshiEndpoint::Positions => "/portfolio/positions".to_string(),
            KalshiEndpoint::Orders | KalshiEndpoint::CreateOrder => {
                "/portfolio/orders".to_string()
            }
            KalshiEndpoint::CancelOrder(order_id) => format!("/portfolio/orders/{}", order_id),
            KalshiEndpoint::Events => "/events".to_string(),
            KalshiEndpoint::Markets => "/markets".to_string(),
            KalshiEndpoint::Market(ticker) => format!("/markets/{}", ticker),
            KalshiEndpoint::Orderbook(ticker) => format!("/markets/{}/orderbook", ticker),
        };
        format!("{}{}", KALSHI_API_PREFIX, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_endpoints_are_get() {
        for endpoint in [
            KalshiEndpoint::Balance,
            KalshiEndpoint::Positions,
            KalshiEndpoint::Orders,
            KalshiEndpoint::Events,
            KalshiEndpoint::Markets,
            KalshiEndpoint::Market("T"),
            KalshiEndpoint::Orderbook("T"),
        ] {
            assert_eq!(endpoint.method(), Method::GET, "{:?}", endpoint);
        }
    }

    #[test]
    fn write_endpoints() {
        assert_eq!(KalshiEndpoint::CreateOrder.method(), Method::POST);
        assert_eq!(KalshiEndpoint::CreateOrder.path(), "/trade-api/v2/portfolio/orders");
        assert_eq!(KalshiEndpoint::CancelOrder("abc").method(), Method::DELETE);
        assert_eq!(
            KalshiEndpoint::CancelOrder("abc").path(),
            "/trade-api/v2/portfolio/orders/abc"
        );
    }

    #[test]
    fn templated_paths() {
        assert_eq!(KalshiEndpoint::Balance.path(), "/trade-api/v2/portfolio/balance");
        assert_eq!(
            KalshiEndpoint::Market("KXBTC15M-X").path(),
            "/trade-api/v2/markets/KXBTC15M-X"
        );
        assert_eq!(
            KalshiEndpoint::Orderbook("KXBTC15M-X").path(),
            "/trade-api/v2/markets/KXBTC15M-X/orderbook"
        );
    }
}
