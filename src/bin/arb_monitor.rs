use clap::Parser;
use tracing::{error, info};

use kalshi_trader::config::Config;
use kalshi_trader::constants::DEFAULT_CONFIG_PATH;
use kalshi_trader::error::Result;
use kalshi_trader::exchanges::coingecko::CoinGeckoClient;
use kalshi_trader::exchanges::kalshi::KalshiClient;
use kalshi_trader::logging::init;
use kalshi_trader::monitor::{format_report, ArbMonitor};

#[derive(Debug, Parser)]
#[command(name = "arb_monitor", about = "Compare crypto spot prices against Kalshi markets")]
struct Args {
    /// Path to the JSON config file
    #[arg(long, env = "KALSHI_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    init();

    let args = Args::parse();

    if let Err(e) = monitor(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn monitor(args: Args) -> Result<()> {
    let config = Config::load(&args.config)?;
    let kalshi = KalshiClient::new(&config.kalshi)?;
    let feed = CoinGeckoClient::new(&config.monitor.price_feed_url)?;

    info!("🔮 Crypto Arb Monitor started against {}", kalshi.base_url());

    let monitor = ArbMonitor::new(feed, kalshi, config.monitor);

    if args.once {
        let report = monitor.run_cycle().await?;
        println!("{}", format_report(&report));
        return Ok(());
    }

    monitor
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
