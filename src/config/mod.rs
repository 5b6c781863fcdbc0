//! Environment-driven configuration
//!
//! Policy constants for the signal engine live in [`SignalConfig`]; the
//! service-level settings (endpoints, schedules, ports) live in [`Config`].

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::core::scheduler::interval_to_cron;

pub const DEFAULT_SYMBOL: &str = "GC=F";
pub const DEFAULT_NEWS_URL: &str = "https://nfs.faireconomy.media/ff_calendar_thisweek.json";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_BACKTEST_CRON: &str = "0 0 0 * * *";
/// Upper bound for minute-valued settings (one week)
pub const MAX_MINUTES: i64 = 10_080;

/// Current deployment environment (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which entries the backtest simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BacktestSides {
    /// Bullish-continuation entries only
    LongOnly,
    /// Also simulate the mirrored SELL entries
    Both,
}

impl FromStr for BacktestSides {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long-only" | "long" => Ok(BacktestSides::LongOnly),
            "both" => Ok(BacktestSides::Both),
            other => Err(format!("unknown backtest sides '{}'", other)),
        }
    }
}

/// Policy constants consumed by the scorer, position builder and backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    pub account_balance: f64,
    /// Fraction of the balance risked per trade (0.01 = 1%)
    pub risk_per_trade: f64,
    /// Target distance as a multiple of the stop distance
    pub rr_ratio: f64,
    pub confidence_threshold: u8,
    pub adx_threshold: f64,
    /// Minimum ATR as a percentage of price
    pub volatility_threshold_pct: f64,
    pub sweep_lookback: usize,
    pub backtest_horizon: usize,
    pub backtest_warmup: usize,
    pub backtest_sides: BacktestSides,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            account_balance: 10_000.0,
            risk_per_trade: 0.01,
            rr_ratio: 2.0,
            confidence_threshold: 75,
            adx_threshold: 25.0,
            volatility_threshold_pct: 0.7,
            sweep_lookback: 20,
            backtest_horizon: 10,
            backtest_warmup: 200,
            backtest_sides: BacktestSides::LongOnly,
        }
    }
}

impl SignalConfig {
    /// Amount of the balance put at risk on a single trade
    pub fn risk_amount(&self) -> f64 {
        self.account_balance * self.risk_per_trade
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.account_balance.is_finite() && self.account_balance > 0.0) {
            return Err(invalid("account_balance", "must be a positive number"));
        }
        if !(self.risk_per_trade > 0.0 && self.risk_per_trade <= 1.0) {
            return Err(invalid("risk_per_trade", "must be in (0, 1]"));
        }
        if !(self.rr_ratio.is_finite() && self.rr_ratio > 0.0) {
            return Err(invalid("rr_ratio", "must be a positive number"));
        }
        if self.confidence_threshold > 100 {
            return Err(invalid("confidence_threshold", "must be at most 100"));
        }
        if self.sweep_lookback == 0 {
            return Err(invalid("sweep_lookback", "must be at least 1"));
        }
        if self.backtest_horizon == 0 {
            return Err(invalid("backtest_horizon", "must be at least 1"));
        }
        Ok(())
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            account_balance: env_or("ACCOUNT_BALANCE", defaults.account_balance),
            risk_per_trade: env_or("RISK_PER_TRADE", defaults.risk_per_trade),
            rr_ratio: env_or("RR_RATIO", defaults.rr_ratio),
            confidence_threshold: env_or("CONFIDENCE_THRESHOLD", defaults.confidence_threshold),
            adx_threshold: env_or("ADX_THRESHOLD", defaults.adx_threshold),
            volatility_threshold_pct: env_or(
                "VOLATILITY_THRESHOLD_PCT",
                defaults.volatility_threshold_pct,
            ),
            sweep_lookback: env_or("SWEEP_LOOKBACK", defaults.sweep_lookback),
            backtest_horizon: env_or("BACKTEST_HORIZON", defaults.backtest_horizon),
            backtest_warmup: env_or("BACKTEST_WARMUP", defaults.backtest_warmup),
            backtest_sides: env_or("BACKTEST_SIDES", defaults.backtest_sides),
        }
    }
}

/// Service settings: instrument, endpoints and schedules.
#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: String,
    pub scan_interval_seconds: u64,
    pub heartbeat_minutes: i64,
    pub news_window_minutes: i64,
    /// Re-check delay after a news blackout, shorter than the scan interval
    pub news_retry_seconds: u64,
    pub news_url: String,
    pub yahoo_base_url: String,
    pub discord_webhook: Option<String>,
    pub backtest_lookback_days: u32,
    pub backtest_cron: String,
    pub http_port: Option<u16>,
    pub signal: SignalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            scan_interval_seconds: 900,
            heartbeat_minutes: 60,
            news_window_minutes: 45,
            news_retry_seconds: 600,
            news_url: DEFAULT_NEWS_URL.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            discord_webhook: None,
            backtest_lookback_days: 120,
            backtest_cron: DEFAULT_BACKTEST_CRON.to_string(),
            http_port: None,
            signal: SignalConfig::default(),
        }
    }
}

impl Config {
    /// Load from the process environment, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            symbol: env::var("SYMBOL").unwrap_or(defaults.symbol),
            scan_interval_seconds: env_or("SCAN_INTERVAL_SECONDS", defaults.scan_interval_seconds),
            heartbeat_minutes: env_or("HEARTBEAT_MINUTES", defaults.heartbeat_minutes),
            news_window_minutes: env_or("NEWS_WINDOW_MINUTES", defaults.news_window_minutes),
            news_retry_seconds: env_or("NEWS_RETRY_SECONDS", defaults.news_retry_seconds),
            news_url: env::var("NEWS_URL").unwrap_or(defaults.news_url),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            discord_webhook: env::var("DISCORD_WEBHOOK")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            backtest_lookback_days: env_or(
                "BACKTEST_LOOKBACK_DAYS",
                defaults.backtest_lookback_days,
            ),
            backtest_cron: env::var("BACKTEST_CRON").unwrap_or(defaults.backtest_cron),
            http_port: env::var("PORT").ok().and_then(|p| p.parse().ok()),
            signal: SignalConfig::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scheduler or runtime cannot honour.
    ///
    /// The scan interval must map onto a cron step that fires at a constant
    /// cadence; see [`interval_to_cron`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if interval_to_cron(self.scan_interval_seconds).is_none() {
            return Err(invalid(
                "scan_interval_seconds",
                "must divide 60 seconds, 60 minutes or 24 hours evenly",
            ));
        }
        if !(1..=MAX_MINUTES).contains(&self.heartbeat_minutes) {
            return Err(invalid("heartbeat_minutes", "must be between 1 and 10080"));
        }
        if !(1..=MAX_MINUTES).contains(&self.news_window_minutes) {
            return Err(invalid("news_window_minutes", "must be between 1 and 10080"));
        }
        if self.news_retry_seconds == 0 {
            return Err(invalid("news_retry_seconds", "must be greater than 0"));
        }
        self.signal.validate()
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// Parse an environment variable, keeping the default when it is missing or
/// malformed.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key = key, value = %raw, default = ?default, "Invalid value for {}, using default", key);
                default
            }
        },
        Err(_) => default,
    }
}
