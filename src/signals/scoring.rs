//! Confidence scoring on a 50..=100 point scale

use crate::config::SignalConfig;
use crate::models::indicators::IndicatorRow;

pub const BASE_SCORE: u8 = 50;
pub const TREND_STRENGTH_POINTS: u8 = 20;
pub const VOLATILITY_POINTS: u8 = 15;
pub const SWEEP_POINTS: u8 = 15;
pub const MAX_SCORE: u8 = 100;

/// Score a setup from the latest lower-timeframe row.
///
/// Starts at 50 and adds points for a strong trend (ADX above threshold),
/// enough volatility (ATR% above threshold) and a fresh liquidity sweep.
/// Undefined indicator values earn nothing.
pub fn confidence_score(row: &IndicatorRow, sweep_detected: bool, config: &SignalConfig) -> u8 {
    let mut score = BASE_SCORE;

    if row.adx.is_some_and(|adx| adx > config.adx_threshold) {
        score += TREND_STRENGTH_POINTS;
    }

    if row
        .atr_pct()
        .is_some_and(|pct| pct > config.volatility_threshold_pct)
    {
        score += VOLATILITY_POINTS;
    }

    if sweep_detected {
        score += SWEEP_POINTS;
    }

    score.min(MAX_SCORE)
}

/// Whether a score clears the configured emission threshold
pub fn is_actionable(score: u8, config: &SignalConfig) -> bool {
    score >= config.confidence_threshold
}
