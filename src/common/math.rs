//! Series math used by the indicators

/// True range of a bar given the previous close.
///
/// The first bar of a series has no previous close and uses `high - low`.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let high_low = high - low;
    match prev_close {
        Some(pc) => high_low.max((high - pc).abs()).max((low - pc).abs()),
        None => high_low,
    }
}

/// Wilder smoothing (alpha = 1/period) of `values[start..]`.
///
/// The first defined output sits at `start + period - 1` and is the simple
/// mean of the first `period` inputs; later outputs follow
/// `prev + (value - prev) / period`. Everything before is `None`.
pub fn wilder_smooth(values: &[f64], start: usize, period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || start >= n || n - start < period {
        return out;
    }

    let seed_end = start + period;
    let seed = values[start..seed_end].iter().sum::<f64>() / period as f64;
    out[seed_end - 1] = Some(seed);

    let mut prev = seed;
    for i in seed_end..n {
        prev += (values[i] - prev) / period as f64;
        out[i] = Some(prev);
    }

    out
}
