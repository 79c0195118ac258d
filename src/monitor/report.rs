use super::pricing::{implied_probability_cents, pct_from_strike};
use super::CycleReport;

/// Renders one cycle as the text printed to stdout.
pub fn format_report(report: &CycleReport) -> String {
    let mut lines = vec![
        format!(
            "🔮 Crypto Arb Monitor - {}",
            report.timestamp.format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        "Current Prices (CoinGecko):".to_string(),
    ];

    for quote in &report.quotes {
        let change = quote
            .change_24h
            .map(|c| format!(" ({:+.1}% 24h)", c))
            .unwrap_or_default();
        lines.push(format!("• {}: {}{}", quote.symbol, format_usd(quote.price), change));
    }
    lines.push(String::new());

    lines.push("15-Min Markets (Kalshi):".to_string());
    if report.markets.is_empty() {
        lines.push("• none with a live quote".to_string());
    }
    for tracked in &report.markets {
        let market = &tracked.market;
        let strike = tracked
            .strike
            .map(format_usd)
            .unwrap_or_else(|| "N/A".to_string());
        let implied = implied_probability_cents(market.yes_bid_cents(), market.yes_ask_cents())
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "N/A".to_string());

        lines.push(format!(
            "• {}: {} | Strike {} | Bid/Ask: {}/{}¢ | Implied {} | Vol: {}",
            tracked.symbol,
            market.ticker,
            strike,
            market.yes_bid_cents(),
            market.yes_ask_cents(),
            implied,
            group_thousands(&market.volume.unwrap_or(0).to_string()),
        ));

        let spot = report.quotes.iter().find(|q| q.symbol == tracked.symbol);
        if let (Some(quote), Some(strike)) = (spot, tracked.strike) {
            if let Some(diff) = pct_from_strike(quote.price, strike) {
                lines.push(format!("  Current vs Strike: {:+.2}%", diff));
            }
        }
    }
    lines.push(String::new());

    if !report.daily.is_empty() {
        lines.push("Daily Markets (Kalshi):".to_string());
        for (series, markets) in &report.daily {
            for market in markets {
                lines.push(format!(
                    "• {} {} | Bid/Ask: {}/{}¢ | Vol: {} | {}",
                    series,
                    market.ticker,
                    market.yes_bid_cents(),
                    market.yes_ask_cents(),
                    group_thousands(&market.volume.unwrap_or(0).to_string()),
                    market.yes_sub_title.as_deref().unwrap_or(""),
                ));
            }
        }
        lines.push(String::new());
    }

    if report.opportunities.is_empty() {
        lines.push("✅ No arbitrage opportunities detected.".to_string());
        lines.push("Markets appear fairly priced relative to current spot prices.".to_string());
    } else {
        lines.push("🚨 ARBITRAGE OPPORTUNITIES DETECTED:".to_string());
        for opp in &report.opportunities {
            let quote_side = match opp.kind {
                super::OpportunityKind::BuyYes => "asks",
                super::OpportunityKind::SellYes => "bids",
            };
            lines.push(format!("• {} {} ({})", opp.kind, opp.symbol, opp.ticker));
            lines.push(format!(
                "  Price {} vs strike {} suggests {}% YES, but market {} {}¢",
                format_usd(opp.spot),
                format_usd(opp.strike),
                opp.fair_value,
                quote_side,
                opp.market_price
            ));
            lines.push(format!("  Estimated edge: {}¢", opp.edge));
        }
    }

    if !report.errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        for err in &report.errors {
            lines.push(format!("• {}", err));
        }
    }

    lines.join("\n")
}

/// `$97,250.00`, or four decimals below one dollar.
pub fn format_usd(value: f64) -> String {
    if value.abs() < 1.0 {
        return format!("${:.4}", value);
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{}{}", sign, out)
}
