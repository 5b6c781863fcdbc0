//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::Candle;

/// EMA over `values`, one output per input.
///
/// Recursive form seeded with the first value, `alpha = 2 / (period + 1)`.
/// The first `period - 1` outputs are `None` (warm-up).
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;

    for (i, &value) in values.iter().enumerate() {
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        prev = Some(next);
        if i + 1 >= period {
            out[i] = Some(next);
        }
    }

    out
}

/// EMA of closing prices
pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    ema_series(&closes, period)
}
