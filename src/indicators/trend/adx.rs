//! ADX (Average Directional Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Wilder's ADX, one output per candle.
///
/// +DM/-DM and TR are Wilder-smoothed from the second candle on, giving
/// +DI/-DI and DX from index `period`. ADX is the Wilder-smoothed DX, so the
/// first defined value sits at `2 * period - 1`.
pub fn calculate_adx(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    if period == 0 || n < 2 {
        return vec![None; n];
    }

    let mut tr = vec![0.0; n];
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let (cur, prev) = (&candles[i], &candles[i - 1]);
        tr[i] = math::true_range(cur.high, cur.low, Some(prev.close));

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    let smooth_tr = math::wilder_smooth(&tr, 1, period);
    let smooth_plus = math::wilder_smooth(&plus_dm, 1, period);
    let smooth_minus = math::wilder_smooth(&minus_dm, 1, period);

    let mut dx = vec![0.0; n];
    for i in 0..n {
        let (Some(tr_avg), Some(sp), Some(sm)) = (smooth_tr[i], smooth_plus[i], smooth_minus[i]) else {
            continue;
        };
        if tr_avg == 0.0 {
            continue;
        }

        let plus_di = 100.0 * sp / tr_avg;
        let minus_di = 100.0 * sm / tr_avg;
        let di_sum = plus_di + minus_di;
        if di_sum > 0.0 {
            dx[i] = 100.0 * (plus_di - minus_di).abs() / di_sum;
        }
    }

    math::wilder_smooth(&dx, period, period)
}
