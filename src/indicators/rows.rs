//! Aligns every indicator with its candle

use crate::indicators::trend::{calculate_adx, calculate_ema};
use crate::indicators::volatility::calculate_atr;
use crate::models::indicators::{Candle, IndicatorRow};

pub const EMA_FAST_PERIOD: usize = 50;
pub const EMA_SLOW_PERIOD: usize = 200;
pub const ATR_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;

/// Compute EMA50, EMA200, ATR(14) and ADX(14) for every candle.
///
/// The output has one row per input candle; values still in their warm-up
/// window are `None`.
pub fn build_indicator_rows(candles: &[Candle]) -> Vec<IndicatorRow> {
    let ema_fast = calculate_ema(candles, EMA_FAST_PERIOD);
    let ema_slow = calculate_ema(candles, EMA_SLOW_PERIOD);
    let atr = calculate_atr(candles, ATR_PERIOD);
    let adx = calculate_adx(candles, ADX_PERIOD);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorRow {
            candle: candle.clone(),
            ema_fast: ema_fast[i],
            ema_slow: ema_slow[i],
            atr: atr[i],
            adx: adx[i],
        })
        .collect()
}
