//! Aurum Worker
//!
//! Runs the scan loop and the daily backtest report, and optionally serves
//! `/health` and `/metrics` when `PORT` is set.

use aurum::config::{self, Config};
use aurum::core::http::{start_server, AppState, HealthStatus};
use aurum::core::runtime::{RuntimeConfig, SignalRuntime};
use aurum::core::scheduler::JobScheduler;
use aurum::logging;
use aurum::metrics::Metrics;
use aurum::services::market_data::MarketDataProvider;
use aurum::services::news::{ForexFactoryCalendar, NewsOracle};
use aurum::services::notifier::{DiscordNotifier, LogNotifier, Notifier};
use aurum::services::yahoo::YahooMarketDataProvider;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let env = config::get_environment();
    info!("Starting Aurum Worker");
    info!(environment = %env, symbol = %config.symbol, "Environment");
    info!(
        interval = config.scan_interval_seconds,
        "Signal Evaluation: every {} seconds", config.scan_interval_seconds
    );

    let metrics = Arc::new(Metrics::new()?);
    let health = Arc::new(RwLock::new(HealthStatus::default()));

    let notifier: Arc<dyn Notifier + Send + Sync> = match config.discord_webhook {
        Some(ref url) => Arc::new(DiscordNotifier::new(url.clone())?),
        None => {
            warn!("DISCORD_WEBHOOK not set, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(YahooMarketDataProvider::new(config.yahoo_base_url.clone())?);
    let news: Arc<dyn NewsOracle + Send + Sync> = Arc::new(ForexFactoryCalendar::new(
        config.news_url.clone(),
        config.news_window_minutes,
    ));

    let runtime = Arc::new(
        SignalRuntime::new(RuntimeConfig::from(&config), provider, notifier, news)
            .with_metrics(metrics.clone())
            .with_health(health.clone()),
    );
    runtime.announce_start().await;

    info!("Starting job scheduler...");
    let scheduler = JobScheduler::new(
        runtime.clone(),
        config.scan_interval_seconds,
        &config.backtest_cron,
    )
    .map_err(|e| format!("Failed to create scheduler: {}", e))?
    .with_news_retry(config.news_retry_seconds);
    scheduler
        .start()
        .await
        .map_err(|e| format!("Failed to start scheduler: {}", e))?;

    let server = config.http_port.map(|port| {
        let state = AppState::new(health.clone(), metrics.clone());
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server stopped");
            }
        })
    });

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    if let Some(handle) = server {
        handle.abort();
    }
    info!("Worker stopped");

    Ok(())
}
