//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Wilder's ATR, one output per candle.
///
/// The first defined value (index `period - 1`) is the mean of the first
/// `period` true ranges; the first true range is `high - low`.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let tr: Vec<f64> = candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let prev_close = i.checked_sub(1).map(|p| candles[p].close);
            math::true_range(c.high, c.low, prev_close)
        })
        .collect();

    math::wilder_smooth(&tr, 0, period)
}
