use clap::Parser;

use kalshi_trader::app::{run, Cli};
use kalshi_trader::config::Config;
use kalshi_trader::error::Result;
use kalshi_trader::exchanges::kalshi::KalshiClient;
use kalshi_trader::logging::init;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn execute(cli: Cli) -> Result<String> {
    let config = Config::load(&cli.config)?;
    let client = KalshiClient::new(&config.kalshi)?;

    run(cli.command, &client).await
}
