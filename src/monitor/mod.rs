//! Spot-vs-Kalshi arbitrage monitor.
//!
//! Every cycle fetches spot quotes, then the open 15-minute market for each
//! tracked asset, and compares the naive fair value against the YES quote.
//! Cycles are independent: nothing is carried from one to the next.

pub mod opportunity;
pub mod pricing;
pub mod report;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{error, info, warn};

pub use opportunity::{find_opportunities, Opportunity, OpportunityKind};
pub use report::format_report;

use crate::config::MonitorConfig;
use crate::error::Result;
use crate::exchanges::kalshi::KalshiMarket;
use crate::exchanges::{MarketSource, PriceQuote, SpotPriceFeed};
use pricing::strike_for;

/// Daily markets shown per series.
const DAILY_MARKETS_SHOWN: usize = 5;
const DAILY_MARKETS_FETCHED: u32 = 20;

/// The 15-minute market chosen for an asset this cycle.
#[derive(Debug, Clone)]
pub struct TrackedMarket {
    pub symbol: String,
    pub market: KalshiMarket,
    pub strike: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub timestamp: DateTime<Utc>,
    pub quotes: Vec<PriceQuote>,
    pub markets: Vec<TrackedMarket>,
    pub daily: Vec<(String, Vec<KalshiMarket>)>,
    pub opportunities: Vec<Opportunity>,
    /// Per-asset market fetch failures; they do not fail the cycle.
    pub errors: Vec<String>,
}

pub struct ArbMonitor<F, M> {
    feed: F,
    markets: M,
    config: MonitorConfig,
    poll_interval: Duration,
}

impl<F, M> ArbMonitor<F, M>
where
    F: SpotPriceFeed,
    M: MarketSource,
{
    pub fn new(feed: F, markets: M, config: MonitorConfig) -> Self {
        let poll_interval = Duration::from_secs(config.poll_interval_secs);
        Self {
            feed,
            markets,
            config,
            poll_interval,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs one cycle. Fails only when the spot quotes cannot be fetched;
    /// market failures are recorded in the report.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let quotes = self.feed.fetch_quotes(&self.config.assets).await?;
        let threshold = i64::from(self.config.edge_threshold_cents);

        let mut markets = Vec::new();
        let mut opportunities = Vec::new();
        let mut errors = Vec::new();

        for asset in &self.config.assets {
            let listed = match self
                .markets
                .open_markets(&asset.series_ticker, self.config.market_limit)
                .await
            {
                Ok(listed) => listed,
                Err(e) => {
                    warn!("Failed to fetch {} markets: {}", asset.series_ticker, e);
                    errors.push(format!("{} markets: {}", asset.symbol, e));
                    continue;
                }
            };

            let Some(market) = listed.into_iter().find(KalshiMarket::has_live_quote) else {
                continue;
            };
            let strike = strike_for(&market);

            let spot = quotes.iter().find(|q| q.symbol == asset.symbol);
            if let (Some(quote), Some(strike)) = (spot, strike) {
                opportunities.extend(find_opportunities(
                    &asset.symbol,
                    quote.price,
                    strike,
                    &market,
                    threshold,
                ));
            }

            markets.push(TrackedMarket {
                symbol: asset.symbol.clone(),
                market,
                strike,
            });
        }

        let daily = self.daily_markets().await;

        Ok(CycleReport {
            timestamp: Utc::now(),
            quotes,
            markets,
            daily,
            opportunities,
            errors,
        })
    }

    /// Active daily range markets, listed for context only.
    async fn daily_markets(&self) -> Vec<(String, Vec<KalshiMarket>)> {
        let mut daily = Vec::new();
        for series in &self.config.daily_series {
            match self.markets.open_markets(series, DAILY_MARKETS_FETCHED).await {
                Ok(listed) => {
                    let active: Vec<KalshiMarket> = listed
                        .into_iter()
                        .filter(|m| m.volume.unwrap_or(0) > 0 || m.yes_bid_cents() > 0)
                        .take(DAILY_MARKETS_SHOWN)
                        .collect();
                    if !active.is_empty() {
                        daily.push((series.clone(), active));
                    }
                }
                Err(e) => warn!("Failed to fetch daily {} markets: {}", series, e),
            }
        }
        daily
    }

    /// Polls until `shutdown` resolves, printing one report per cycle.
    /// Shutdown is checked before each cycle and during the sleep, never
    /// mid-cycle. Returns the number of cycles run.
    pub async fn run<S>(&self, shutdown: S) -> u64
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0u64;

        info!(
            "Monitoring {} assets every {:?} (edge threshold {}¢)",
            self.config.assets.len(),
            self.poll_interval,
            self.config.edge_threshold_cents
        );

        loop {
            // Polled before every cycle, including the first, so signal
            // listeners are registered before any request goes out.
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping after {} cycles", cycles);
                    break;
                }
                _ = std::future::ready(()) => {}
            }

            cycles += 1;
            match self.run_cycle().await {
                Ok(report) => {
                    info!(
                        "Cycle {}: {} markets, {} opportunities",
                        cycles,
                        report.markets.len(),
                        report.opportunities.len()
                    );
                    println!("{}\n", format_report(&report));
                }
                Err(e) => {
                    error!("Cycle {} failed: {}", cycles, e);
                    println!("Error fetching prices: {}\n", e);
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping after {} cycles", cycles);
                    break;
                }
                _ = sleep(self.poll_interval) => {}
            }
        }

        cycles
    }
}
