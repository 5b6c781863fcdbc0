//! Fixed fractional-risk position sizing
//!
//! ```text
//! stop        = entry -/+ ATR
//! target      = entry +/- ATR * RR
//! risk_amount = balance * risk_per_trade
//! size        = risk_amount / |entry - stop|
//! profit      = |target - entry| * size
//! ```

use crate::config::SignalConfig;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::{SignalDirection, TradeSignal};
use crate::signals::error::SignalError;

/// Build a sized trade from the latest row.
///
/// `direction` must be BUY or SELL. The returned signal carries a
/// confidence of 0; the caller attaches the score. Fails with
/// `DivisionUndefined` when ATR is missing, zero or not finite.
pub fn build_position(
    symbol: &str,
    direction: SignalDirection,
    row: &IndicatorRow,
    config: &SignalConfig,
) -> Result<TradeSignal, SignalError> {
    let entry = row.close();
    let atr = match row.atr {
        Some(atr) if atr.is_finite() && atr > 0.0 && entry.is_finite() => atr,
        other => return Err(SignalError::DivisionUndefined { atr: other }),
    };

    let rr = config.rr_ratio;
    let (stop, target) = match direction {
        SignalDirection::Buy => (entry - atr, entry + atr * rr),
        SignalDirection::Sell => (entry + atr, entry - atr * rr),
        SignalDirection::None => return Err(SignalError::NoDirection),
    };

    let risk_distance = (entry - stop).abs();
    let reward_distance = (target - entry).abs();
    if risk_distance == 0.0 {
        return Err(SignalError::DivisionUndefined { atr: Some(atr) });
    }

    let size = config.risk_amount() / risk_distance;
    let potential_profit = reward_distance * size;

    Ok(TradeSignal {
        symbol: symbol.to_string(),
        direction,
        entry,
        stop,
        target,
        size,
        potential_profit,
        confidence: 0,
        risk_reward: reward_distance / risk_distance,
        timestamp: row.candle.timestamp,
    })
}
