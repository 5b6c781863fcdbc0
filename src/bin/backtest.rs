//! One-shot backtest over the configured lookback window
//!
//! Prints the report to stdout. Uses the same environment variables as the
//! worker; no notification is sent unless `DISCORD_WEBHOOK` is set.

use aurum::config::Config;
use aurum::core::messages::backtest_message;
use aurum::core::runtime::{RuntimeConfig, SignalRuntime};
use aurum::logging;
use aurum::services::market_data::MarketDataProvider;
use aurum::services::news::NewsOracle;
use aurum::services::notifier::{DiscordNotifier, LogNotifier, Notifier};
use aurum::services::yahoo::YahooMarketDataProvider;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

/// The backtest never consults the calendar.
struct NoNews;

#[async_trait::async_trait]
impl NewsOracle for NoNews {
    async fn high_impact_event_imminent(&self) -> bool {
        false
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(
        symbol = %config.symbol,
        lookback_days = config.backtest_lookback_days,
        sides = ?config.signal.backtest_sides,
        "Running backtest"
    );

    let notifier: Arc<dyn Notifier + Send + Sync> = match config.discord_webhook {
        Some(ref url) => Arc::new(DiscordNotifier::new(url.clone())?),
        None => Arc::new(LogNotifier),
    };
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);

    let runtime = SignalRuntime::new(
        RuntimeConfig::from(&config),
        provider,
        notifier,
        Arc::new(NoNews),
    );

    match runtime.run_backtest_job().await? {
        Some(result) => println!("{}", backtest_message(&config.symbol, &result)),
        None => println!("No trades resolved in the last {} days", config.backtest_lookback_days),
    }

    Ok(())
}
