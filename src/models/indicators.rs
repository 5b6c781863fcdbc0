use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC bar as delivered by the market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// All prices finite and the high/low bracket both open and close.
    pub fn is_consistent(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite())
            && self.high >= self.low
            && self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
    }
}

/// A candle extended with the derived indicator values at its index.
///
/// `None` marks a value that is still inside its warm-up window and must not
/// be consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub candle: Candle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_fast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_slow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<f64>,
}

impl IndicatorRow {
    pub fn new(candle: Candle) -> Self {
        Self {
            candle,
            ema_fast: None,
            ema_slow: None,
            atr: None,
            adx: None,
        }
    }

    pub fn with_emas(mut self, fast: f64, slow: f64) -> Self {
        self.ema_fast = Some(fast);
        self.ema_slow = Some(slow);
        self
    }

    pub fn with_atr(mut self, atr: f64) -> Self {
        self.atr = Some(atr);
        self
    }

    pub fn with_adx(mut self, adx: f64) -> Self {
        self.adx = Some(adx);
        self
    }

    pub fn close(&self) -> f64 {
        self.candle.close
    }

    /// ATR as a percentage of the close.
    pub fn atr_pct(&self) -> Option<f64> {
        let atr = self.atr?;
        if self.candle.close == 0.0 {
            return None;
        }
        Some((atr / self.candle.close) * 100.0)
    }
}
