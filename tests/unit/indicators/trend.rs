//! Unit tests for EMA and ADX

use chrono::{Duration, TimeZone, Utc};
use aurum::indicators::trend::{calculate_adx, calculate_ema, ema_series};
use aurum::models::indicators::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(c, c + 1.0, c - 1.0, c, 0.0, start + Duration::hours(i as i64)))
        .collect()
}

#[test]
fn test_ema_seeded_with_first_value() {
    let out = ema_series(&[10.0, 20.0, 30.0], 3);
    // alpha = 0.5: 10 -> 15 -> 22.5
    assert_eq!(out[0], None);
    assert_eq!(out[1], None);
    assert!((out[2].unwrap() - 22.5).abs() < 1e-12);
}

#[test]
fn test_ema_follows_closes() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let ema = calculate_ema(&candles, 2);
    assert_eq!(ema.len(), 5);
    assert!(ema[0].is_none());
    let last = ema[4].unwrap();
    assert!(last < 5.0 && last > 4.0);
}

#[test]
fn test_ema_period_longer_than_series() {
    let out = ema_series(&[1.0, 2.0], 5);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn test_adx_first_defined_at_twice_period() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let adx = calculate_adx(&candles_from_closes(&closes), 14);
    assert!(adx[26].is_none());
    assert!(adx[27].is_some());
}

#[test]
fn test_adx_of_one_way_trend_is_maximal() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + 2.0 * i as f64).collect();
    let adx = calculate_adx(&candles_from_closes(&closes), 14);
    // Every bar has +DM and no -DM, so DX is 100 throughout
    assert!((adx[59].unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_adx_short_series_undefined() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let adx = calculate_adx(&candles_from_closes(&closes), 14);
    assert!(adx.iter().all(Option::is_none));
}
