//! Scan-cycle orchestration around the signal engine
//!
//! One cycle: heartbeat, news gate, fetch both timeframes, evaluate, filter
//! by confidence and dedup key, notify. All I/O happens here; the engine
//! itself stays synchronous.

use crate::backtest::run_backtest;
use crate::config::{Config, SignalConfig, MAX_MINUTES};
use crate::core::context::OrchestrationContext;
use crate::core::http::HealthStatus;
use crate::core::messages;
use crate::indicators::build_indicator_rows;
use crate::metrics::Metrics;
use crate::models::backtest::BacktestResult;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::TradeSignal;
use crate::services::market_data::{validate_series, MarketDataProvider, Timeframe};
use crate::services::news::NewsOracle;
use crate::services::notifier::Notifier;
use crate::signals::engine::SignalEngine;
use crate::signals::error::SignalError;
use crate::signals::scoring::is_actionable;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Configuration for the scan loop
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub symbol: String,
    pub evaluation_interval_seconds: u64,
    pub heartbeat_minutes: i64,
    pub higher_timeframe: Timeframe,
    pub higher_lookback_days: u32,
    pub lower_timeframe: Timeframe,
    pub lower_lookback_days: u32,
    pub backtest_timeframe: Timeframe,
    pub backtest_lookback_days: u32,
    pub signal: SignalConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: crate::config::DEFAULT_SYMBOL.to_string(),
            evaluation_interval_seconds: 900,
            heartbeat_minutes: 60,
            higher_timeframe: Timeframe::H1,
            higher_lookback_days: 60,
            lower_timeframe: Timeframe::M15,
            lower_lookback_days: 7,
            backtest_timeframe: Timeframe::H1,
            backtest_lookback_days: 120,
            signal: SignalConfig::default(),
        }
    }
}

impl From<&Config> for RuntimeConfig {
    fn from(config: &Config) -> Self {
        Self {
            symbol: config.symbol.clone(),
            evaluation_interval_seconds: config.scan_interval_seconds,
            heartbeat_minutes: config.heartbeat_minutes,
            backtest_lookback_days: config.backtest_lookback_days,
            signal: config.signal.clone(),
            ..Self::default()
        }
    }
}

/// Why an evaluated setup was not sent
#[derive(Debug, Clone, PartialEq)]
pub enum SuppressReason {
    Duplicate,
    BelowThreshold { confidence: u8 },
    Unsizable,
}

/// What a scan cycle ended with
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    NewsBlackout,
    NoSetup,
    InsufficientHistory,
    Suppressed(SuppressReason),
    Emitted(TradeSignal),
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    news: Arc<dyn NewsOracle + Send + Sync>,
    metrics: Option<Arc<Metrics>>,
    health: Option<Arc<RwLock<HealthStatus>>>,
}

impl SignalRuntime {
    pub fn new(
        config: RuntimeConfig,
        data_provider: Arc<dyn MarketDataProvider + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        news: Arc<dyn NewsOracle + Send + Sync>,
    ) -> Self {
        Self {
            config,
            data_provider,
            notifier,
            news,
            metrics: None,
            health: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_health(mut self, health: Arc<RwLock<HealthStatus>>) -> Self {
        self.health = Some(health);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Deliver a message; failures are logged and counted, never returned.
    async fn send(&self, text: &str) -> bool {
        match self.notifier.notify(text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Notification delivery failed");
                if let Some(ref metrics) = self.metrics {
                    metrics.notification_failures_total.inc();
                }
                false
            }
        }
    }

    pub async fn announce_start(&self) {
        info!(symbol = %self.config.symbol, "Announcing deployment");
        self.send(&messages::startup_message(&self.config.symbol)).await;
    }

    async fn fetch_rows(&self, timeframe: Timeframe, lookback_days: u32) -> Result<Vec<IndicatorRow>, SignalError> {
        let candles = self
            .data_provider
            .fetch(&self.config.symbol, timeframe, lookback_days)
            .await?;
        validate_series(&candles)?;
        Ok(build_indicator_rows(&candles))
    }

    /// Run one scan cycle against the given context.
    ///
    /// Data errors are returned; the caller decides how to report them.
    pub async fn run_cycle(
        &self,
        ctx: &mut OrchestrationContext,
        now: DateTime<Utc>,
    ) -> Result<CycleOutcome, SignalError> {
        let symbol = &self.config.symbol;
        if let Some(ref metrics) = self.metrics {
            metrics.cycles_total.inc();
        }

        let heartbeat_every = Duration::minutes(self.config.heartbeat_minutes.clamp(1, MAX_MINUTES));
        if ctx.heartbeat_due(now, heartbeat_every) {
            self.send(&messages::heartbeat_message()).await;
            ctx.record_heartbeat(now);
        }

        if self.news.high_impact_event_imminent().await {
            info!(symbol = %symbol, "High-impact event imminent, skipping cycle");
            if let Some(ref metrics) = self.metrics {
                metrics.news_blackouts_total.inc();
            }
            return Ok(CycleOutcome::NewsBlackout);
        }

        let higher = self
            .fetch_rows(self.config.higher_timeframe, self.config.higher_lookback_days)
            .await?;
        let lower = self
            .fetch_rows(self.config.lower_timeframe, self.config.lower_lookback_days)
            .await?;

        let signal = match SignalEngine::evaluate(symbol, &higher, &lower, &self.config.signal) {
            Ok(Some(signal)) => signal,
            Ok(None) => {
                debug!(symbol = %symbol, "Timeframes disagree, no setup");
                return Ok(CycleOutcome::NoSetup);
            }
            Err(SignalError::InsufficientHistory { required, available }) => {
                warn!(
                    symbol = %symbol,
                    required = required,
                    available = available,
                    "Not enough candles ({} < {}), no signal",
                    available,
                    required
                );
                return Ok(CycleOutcome::InsufficientHistory);
            }
            Err(SignalError::DivisionUndefined { atr }) => {
                warn!(symbol = %symbol, atr = ?atr, "ATR undefined, suppressing signal");
                self.count_suppressed();
                return Ok(CycleOutcome::Suppressed(SuppressReason::Unsizable));
            }
            Err(e) => return Err(e),
        };

        if let Some(ref metrics) = self.metrics {
            metrics.last_confidence.set(i64::from(signal.confidence));
        }

        let key = signal.key();
        if ctx.is_duplicate(&key) {
            debug!(symbol = %symbol, key = %key, "Setup unchanged since last signal");
            self.count_suppressed();
            return Ok(CycleOutcome::Suppressed(SuppressReason::Duplicate));
        }

        if !is_actionable(signal.confidence, &self.config.signal) {
            info!(
                symbol = %symbol,
                direction = %signal.direction,
                confidence = signal.confidence,
                threshold = self.config.signal.confidence_threshold,
                "Setup below confidence threshold ({} < {})",
                signal.confidence,
                self.config.signal.confidence_threshold
            );
            self.count_suppressed();
            return Ok(CycleOutcome::Suppressed(SuppressReason::BelowThreshold {
                confidence: signal.confidence,
            }));
        }

        info!(
            symbol = %symbol,
            direction = %signal.direction,
            entry = signal.entry,
            stop = signal.stop,
            target = signal.target,
            confidence = signal.confidence,
            "Emitting {} signal for {} (confidence {}/100)",
            signal.direction,
            symbol,
            signal.confidence
        );
        self.send(&messages::signal_message(&signal)).await;
        ctx.record_signal(key);
        if let Some(ref metrics) = self.metrics {
            metrics.signals_emitted_total.inc();
        }

        Ok(CycleOutcome::Emitted(signal))
    }

    /// Run a cycle and absorb its failure: log, count, alert, carry on.
    pub async fn tick(&self, ctx: &mut OrchestrationContext, now: DateTime<Utc>) -> Option<CycleOutcome> {
        let result = self.run_cycle(ctx, now).await;
        let outcome = match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(symbol = %self.config.symbol, error = %e, "Scan cycle failed, retrying next tick");
                if let Some(ref metrics) = self.metrics {
                    metrics.cycle_errors_total.inc();
                }
                self.send(&messages::error_message(&e.to_string())).await;
                None
            }
        };

        if let Some(ref health) = self.health {
            let mut status = health.write().await;
            status.last_cycle = Some(now);
            status.last_heartbeat = ctx.last_heartbeat;
            status.last_signal = ctx.last_signal.map(|key| key.to_string());
        }

        outcome
    }

    /// Fetch the backtest window, replay it and send the report.
    ///
    /// Returns `Ok(None)` when the run produced no resolved trades.
    pub async fn run_backtest_job(&self) -> Result<Option<BacktestResult>, SignalError> {
        let rows = self
            .fetch_rows(self.config.backtest_timeframe, self.config.backtest_lookback_days)
            .await?;

        let Some(result) = run_backtest(&rows, &self.config.signal) else {
            info!(symbol = %self.config.symbol, rows = rows.len(), "Backtest produced no resolved trades");
            return Ok(None);
        };

        info!(
            symbol = %self.config.symbol,
            win_rate = result.win_rate,
            expectancy = result.expectancy,
            sample_size = result.sample_size,
            "Backtest: {:.1}% win rate, {:.2}R expectancy over {} trades",
            result.win_rate * 100.0,
            result.expectancy,
            result.sample_size
        );
        if let Some(ref metrics) = self.metrics {
            metrics.backtest_win_rate.set(result.win_rate);
            metrics.backtest_expectancy.set(result.expectancy);
        }
        self.send(&messages::backtest_message(&self.config.symbol, &result))
            .await;

        Ok(Some(result))
    }

    fn count_suppressed(&self) {
        if let Some(ref metrics) = self.metrics {
            metrics.signals_suppressed_total.inc();
        }
    }
}
