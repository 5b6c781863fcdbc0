//! Main signal evaluation engine: trend, sweep, confidence and sizing.

use crate::config::SignalConfig;
use crate::indicators::EMA_SLOW_PERIOD;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::{SignalDirection, TradeSignal};
use crate::signals::error::SignalError;
use crate::signals::position::build_position;
use crate::signals::scoring::confidence_score;
use crate::signals::sweep::detect_liquidity_sweep;
use crate::signals::trend::classify_trend;

/// Fewest rows a series needs before its slow EMA is defined
pub const MIN_CANDLES: usize = EMA_SLOW_PERIOD;

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate the latest setup from a higher and a lower timeframe.
    ///
    /// Returns `Ok(None)` when the timeframes do not agree on a direction.
    /// The returned signal is not filtered by the confidence threshold.
    pub fn evaluate(
        symbol: &str,
        higher: &[IndicatorRow],
        lower: &[IndicatorRow],
        config: &SignalConfig,
    ) -> Result<Option<TradeSignal>, SignalError> {
        let available = higher.len().min(lower.len());
        if available < MIN_CANDLES {
            return Err(SignalError::InsufficientHistory {
                required: MIN_CANDLES,
                available,
            });
        }

        let (Some(higher_last), Some(lower_last)) = (higher.last(), lower.last()) else {
            return Err(SignalError::InsufficientHistory {
                required: MIN_CANDLES,
                available: 0,
            });
        };

        let direction = classify_trend(higher_last, lower_last);
        if direction == SignalDirection::None {
            return Ok(None);
        }

        let mut signal = build_position(symbol, direction, lower_last, config)?;
        let sweep = detect_liquidity_sweep(lower, config.sweep_lookback);
        signal.confidence = confidence_score(lower_last, sweep, config);

        Ok(Some(signal))
    }
}
