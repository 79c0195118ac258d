//! Naive fair-value model for 15-minute crypto strike markets.
//!
//! Each percent the spot sits above (below) the strike adds (removes) fifteen
//! cents of YES value around a 50 cent midpoint, clamped to [5, 95]. There is
//! no volatility or time-to-expiry term.

use crate::exchanges::kalshi::KalshiMarket;

pub const MIDPOINT_CENTS: f64 = 50.0;
pub const CENTS_PER_PERCENT: f64 = 15.0;
pub const FLOOR_CENTS: f64 = 5.0;
pub const CAP_CENTS: f64 = 95.0;

/// Estimated YES value in cents. `None` for a non-positive strike or a
/// non-finite spot.
pub fn fair_value_cents(spot: f64, strike: f64) -> Option<i64> {
    if !spot.is_finite() || !strike.is_finite() || strike <= 0.0 {
        return None;
    }

    let pct_diff = (spot - strike) / strike * 100.0;
    let fair_value = (MIDPOINT_CENTS + pct_diff * CENTS_PER_PERCENT).clamp(FLOOR_CENTS, CAP_CENTS);
    Some(fair_value.round() as i64)
}

/// Percentage distance of spot from strike.
pub fn pct_from_strike(spot: f64, strike: f64) -> Option<f64> {
    if strike <= 0.0 {
        return None;
    }
    Some((spot - strike) / strike * 100.0)
}

/// Probability (in cents) implied by the YES quote: the bid/ask midpoint when
/// both sides are live, otherwise whichever side is.
pub fn implied_probability_cents(yes_bid: i64, yes_ask: i64) -> Option<f64> {
    let has_bid = yes_bid > 0;
    let has_ask = yes_ask > 0 && yes_ask < 100;
    match (has_bid, has_ask) {
        (true, true) => Some((yes_bid + yes_ask) as f64 / 2.0),
        (true, false) => Some(yes_bid as f64),
        (false, true) => Some(yes_ask as f64),
        (false, false) => None,
    }
}

/// Strike from the market's `floor_strike`, or parsed from its YES subtitle.
pub fn strike_for(market: &KalshiMarket) -> Option<f64> {
    market
        .floor_strike
        .filter(|s| *s > 0.0)
        .or_else(|| market.yes_sub_title.as_deref().and_then(parse_strike))
}

/// Parses the dollar amount in text such as `"Price to beat: $97,250.00"`.
pub fn parse_strike(text: &str) -> Option<f64> {
    let (_, after) = text.split_once('$')?;
    let number: String = after
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    let number = number.trim_end_matches('.');
    number.parse::<f64>().ok().filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_at_strike_is_fifty() {
        assert_eq!(fair_value_cents(97_250.0, 97_250.0), Some(50));
        assert_eq!(fair_value_cents(0.38, 0.38), Some(50));
    }

    #[test]
    fn one_percent_moves_fifteen_cents() {
        assert_eq!(fair_value_cents(101.0, 100.0), Some(65));
        assert_eq!(fair_value_cents(99.0, 100.0), Some(35));
    }

    #[test]
    fn clamps_to_floor_and_cap() {
        assert_eq!(fair_value_cents(200.0, 100.0), Some(95));
        assert_eq!(fair_value_cents(10.0, 100.0), Some(5));
    }

    #[test]
    fn rejects_bad_strike() {
        assert_eq!(fair_value_cents(100.0, 0.0), None);
        assert_eq!(fair_value_cents(100.0, -5.0), None);
        assert_eq!(fair_value_cents(f64::NAN, 100.0), None);
    }

    #[test]
    fn implied_probability_uses_live_sides() {
        assert_eq!(implied_probability_cents(44, 48), Some(46.0));
        assert_eq!(implied_probability_cents(44, 100), Some(44.0));
        assert_eq!(implied_probability_cents(0, 30), Some(30.0));
        assert_eq!(implied_probability_cents(0, 100), None);
    }

    #[test]
    fn parses_strike_from_subtitle() {
        assert_eq!(parse_strike("Price to beat: $97,250.00"), Some(97_250.0));
        assert_eq!(parse_strike("Price to beat: $3,412.5 or above"), Some(3_412.5));
        assert_eq!(parse_strike("Target price $0.3812."), Some(0.3812));
        assert_eq!(parse_strike("No dollar amount"), None);
        assert_eq!(parse_strike("$"), None);
    }

    #[test]
    fn floor_strike_wins_over_subtitle() {
        let raw = r#"{
            "ticker": "T",
            "floor_strike": 97000.0,
            "yes_sub_title": "Price to beat: $1,000.00"
        }"#;
        let market: KalshiMarket = serde_json::from_str(raw).unwrap();
        assert_eq!(strike_for(&market), Some(97_000.0));

        let raw = r#"{"ticker": "T", "yes_sub_title": "Price to beat: $1,000.00"}"#;
        let market: KalshiMarket = serde_json::from_str(raw).unwrap();
        assert_eq!(strike_for(&market), Some(1_000.0));
    }
}
