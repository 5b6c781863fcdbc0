//! Prometheus metrics for the signal loop and HTTP endpoints

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycle_errors_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub signals_suppressed_total: IntCounter,
    pub notification_failures_total: IntCounter,
    pub news_blackouts_total: IntCounter,
    pub last_confidence: IntGauge,
    pub backtest_win_rate: Gauge,
    pub backtest_expectancy: Gauge,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("aurum".to_string()), None)?;

        let cycles_total = IntCounter::new("cycles_total", "Scan cycles started")?;
        let cycle_errors_total = IntCounter::new("cycle_errors_total", "Scan cycles that ended in an error")?;
        let signals_emitted_total = IntCounter::new("signals_emitted_total", "Signals sent to the notifier")?;
        let signals_suppressed_total = IntCounter::new(
            "signals_suppressed_total",
            "Setups dropped as duplicates, below threshold or unsizable",
        )?;
        let notification_failures_total =
            IntCounter::new("notification_failures_total", "Failed notification deliveries")?;
        let news_blackouts_total =
            IntCounter::new("news_blackouts_total", "Cycles skipped for a high-impact event")?;
        let last_confidence = IntGauge::new("last_confidence", "Confidence of the last evaluated setup")?;
        let backtest_win_rate = Gauge::new("backtest_win_rate", "Win rate of the last backtest")?;
        let backtest_expectancy = Gauge::new("backtest_expectancy", "Expectancy (R) of the last backtest")?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycle_errors_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(signals_suppressed_total.clone()))?;
        registry.register(Box::new(notification_failures_total.clone()))?;
        registry.register(Box::new(news_blackouts_total.clone()))?;
        registry.register(Box::new(last_confidence.clone()))?;
        registry.register(Box::new(backtest_win_rate.clone()))?;
        registry.register(Box::new(backtest_expectancy.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycle_errors_total,
            signals_emitted_total,
            signals_suppressed_total,
            notification_failures_total,
            news_blackouts_total,
            last_confidence,
            backtest_win_rate,
            backtest_expectancy,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
