//! Multi-timeframe trend classification

use crate::models::indicators::IndicatorRow;
use crate::models::signal::SignalDirection;

/// Bias of a single row: `Some(true)` bullish, `Some(false)` bearish.
///
/// Equal or undefined EMAs give `None`.
fn ema_bias(row: &IndicatorRow) -> Option<bool> {
    let fast = row.ema_fast?;
    let slow = row.ema_slow?;
    if fast > slow {
        Some(true)
    } else if fast < slow {
        Some(false)
    } else {
        None
    }
}

/// BUY when EMA50 > EMA200 on both timeframes, SELL when below on both.
///
/// Disagreement or any undefined value yields `SignalDirection::None`.
pub fn classify_trend(higher: &IndicatorRow, lower: &IndicatorRow) -> SignalDirection {
    match (ema_bias(higher), ema_bias(lower)) {
        (Some(true), Some(true)) => SignalDirection::Buy,
        (Some(false), Some(false)) => SignalDirection::Sell,
        _ => SignalDirection::None,
    }
}
