use std::fmt;

use serde::Serialize;

use super::pricing::fair_value_cents;
use crate::exchanges::kalshi::KalshiMarket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpportunityKind {
    /// Fair value sits above the YES ask.
    BuyYes,
    /// Fair value sits below the YES bid.
    SellYes,
}

impl fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpportunityKind::BuyYes => f.write_str("BUY_YES"),
            OpportunityKind::SellYes => f.write_str("SELL_YES"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub kind: OpportunityKind,
    pub symbol: String,
    pub ticker: String,
    pub spot: f64,
    pub strike: f64,
    pub fair_value: i64,
    /// The ask for `BuyYes`, the bid for `SellYes`.
    pub market_price: i64,
    pub edge: i64,
}

/// Compares the fair value for `spot` against the market's YES quote. A side
/// is flagged when it is mispriced by strictly more than `threshold` cents.
pub fn find_opportunities(
    symbol: &str,
    spot: f64,
    strike: f64,
    market: &KalshiMarket,
    threshold: i64,
) -> Vec<Opportunity> {
    let Some(fair_value) = fair_value_cents(spot, strike) else {
        return Vec::new();
    };

    let yes_bid = market.yes_bid_cents();
    let yes_ask = market.yes_ask_cents();
    let build = |kind, market_price: i64, edge| Opportunity {
        kind,
        symbol: symbol.to_string(),
        ticker: market.ticker.clone(),
        spot,
        strike,
        fair_value,
        market_price,
        edge,
    };

    let mut found = Vec::new();
    if yes_ask < 100 && fair_value > yes_ask + threshold {
        found.push(build(OpportunityKind::BuyYes, yes_ask, fair_value - yes_ask));
    }
    if yes_bid > 0 && fair_value < yes_bid - threshold {
        found.push(build(OpportunityKind::SellYes, yes_bid, yes_bid - fair_value));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(yes_bid: i64, yes_ask: i64) -> KalshiMarket {
        let raw = serde_json::json!({
            "ticker": "KXBTC15M-TEST",
            "yes_bid": yes_bid,
            "yes_ask": yes_ask,
        });
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn at_strike_flags_only_beyond_threshold() {
        // Fair value is 50; threshold 5.
        assert!(find_opportunities("BTC", 100.0, 100.0, &market(40, 45), 5).is_empty());
        assert!(find_opportunities("BTC", 100.0, 100.0, &market(55, 60), 5).is_empty());

        let buy = find_opportunities("BTC", 100.0, 100.0, &market(40, 44), 5);
        assert_eq!(buy.len(), 1);
        assert_eq!(buy[0].kind, OpportunityKind::BuyYes);
        assert_eq!(buy[0].fair_value, 50);
        assert_eq!(buy[0].edge, 6);

        let sell = find_opportunities("BTC", 100.0, 100.0, &market(56, 60), 5);
        assert_eq!(sell.len(), 1);
        assert_eq!(sell[0].kind, OpportunityKind::SellYes);
        assert_eq!(sell[0].market_price, 56);
        assert_eq!(sell[0].edge, 6);
    }

    #[test]
    fn spot_above_strike_suggests_buying_yes() {
        // 2% above strike: fair value 80.
        let found = find_opportunities("ETH", 102.0, 100.0, &market(60, 65), 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, OpportunityKind::BuyYes);
        assert_eq!(found[0].edge, 15);
        assert_eq!(found[0].ticker, "KXBTC15M-TEST");
    }

    #[test]
    fn empty_sides_are_never_flagged() {
        // No ask (100) and no bid (0): nothing to trade against.
        assert!(find_opportunities("BTC", 150.0, 100.0, &market(0, 100), 5).is_empty());
        assert!(find_opportunities("BTC", 50.0, 100.0, &market(0, 100), 5).is_empty());
    }

    #[test]
    fn zero_ask_is_not_an_offer() {
        assert!(find_opportunities("BTC", 100.0, 100.0, &market(0, 0), 5).is_empty());
        assert!(find_opportunities("BTC", 150.0, 100.0, &market(0, 0), 5).is_empty());
    }

    #[test]
    fn invalid_strike_yields_nothing() {
        assert!(find_opportunities("BTC", 100.0, 0.0, &market(10, 20), 5).is_empty());
    }

    #[test]
    fn kind_display_matches_report_labels() {
        assert_eq!(OpportunityKind::BuyYes.to_string(), "BUY_YES");
        assert_eq!(OpportunityKind::SellYes.to_string(), "SELL_YES");
    }
}
