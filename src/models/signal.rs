//! Trade signal records produced by the signal engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    None,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
            SignalDirection::None => "NONE",
        };
        f.write_str(label)
    }
}

/// A fully sized hypothetical trade.
///
/// Never persisted; it can be re-derived at any time from the same candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub symbol: String,
    pub direction: SignalDirection,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub size: f64,
    pub potential_profit: f64,
    /// Confidence on the 50..=100 point scale
    pub confidence: u8,
    pub risk_reward: f64,
    pub timestamp: DateTime<Utc>,
}

impl TradeSignal {
    pub fn key(&self) -> SignalKey {
        SignalKey::new(self.direction, self.entry)
    }

    pub fn risk_distance(&self) -> f64 {
        (self.entry - self.stop).abs()
    }
}

/// Deduplication key: direction plus entry rounded to one decimal.
///
/// The entry is kept as an integer count of tenths so equality never depends
/// on float comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalKey {
    pub direction: SignalDirection,
    pub entry_tenths: i64,
}

impl SignalKey {
    pub fn new(direction: SignalDirection, entry: f64) -> Self {
        Self {
            direction,
            entry_tenths: (entry * 10.0).round() as i64,
        }
    }
}

impl fmt::Display for SignalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:.1}", self.direction, self.entry_tenths as f64 / 10.0)
    }
}
