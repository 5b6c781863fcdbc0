use serde::{Deserialize, Serialize};

/// Aggregate outcome of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub wins: usize,
    pub losses: usize,
    /// Qualifying entries whose scan window touched neither level
    pub unresolved: usize,
    pub win_rate: f64,
    /// Expected gain per trade in units of risk (R)
    pub expectancy: f64,
    pub sample_size: usize,
    pub risk_reward: f64,
}

impl BacktestResult {
    /// Build a result from raw counts. Returns `None` for an empty sample.
    pub fn from_counts(wins: usize, losses: usize, unresolved: usize, risk_reward: f64) -> Option<Self> {
        let sample_size = wins + losses;
        if sample_size == 0 {
            return None;
        }

        let win_rate = wins as f64 / sample_size as f64;
        let expectancy = win_rate * risk_reward - (1.0 - win_rate);

        Some(Self {
            wins,
            losses,
            unresolved,
            win_rate,
            expectancy,
            sample_size,
            risk_reward,
        })
    }
}
