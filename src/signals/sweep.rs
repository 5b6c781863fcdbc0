//! Liquidity sweep (stop-hunt) detection

use crate::models::indicators::IndicatorRow;

/// True when the last candle wicked through the rolling extreme of the
/// `lookback` candles before it and closed back inside.
///
/// The window ends at the second-to-last candle. Needs `lookback + 1` rows;
/// shorter series return false.
pub fn detect_liquidity_sweep(rows: &[IndicatorRow], lookback: usize) -> bool {
    if lookback == 0 || rows.len() < lookback + 1 {
        return false;
    }

    let last = &rows[rows.len() - 1].candle;
    let window = &rows[rows.len() - 1 - lookback..rows.len() - 1];

    let high_roll = window
        .iter()
        .map(|r| r.candle.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let low_roll = window
        .iter()
        .map(|r| r.candle.low)
        .fold(f64::INFINITY, f64::min);

    let sweep_high = last.high > high_roll && last.close < high_roll;
    let sweep_low = last.low < low_roll && last.close > low_roll;

    sweep_high || sweep_low
}
