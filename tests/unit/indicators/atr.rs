//! Unit tests for ATR

use chrono::{Duration, TimeZone, Utc};
use aurum::indicators::volatility::calculate_atr;
use aurum::models::indicators::Candle;

#[test]
fn test_atr_constant_range() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles: Vec<Candle> = (0..30)
        .map(|i| Candle::new(100.0, 104.0, 96.0, 100.0, 0.0, start + Duration::hours(i)))
        .collect();

    let atr = calculate_atr(&candles, 14);
    assert!(atr[12].is_none());
    assert!((atr[13].unwrap() - 8.0).abs() < 1e-12);
    assert!((atr[29].unwrap() - 8.0).abs() < 1e-12);
}

#[test]
fn test_atr_includes_gaps() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let candles = vec![
        Candle::new(100.0, 101.0, 99.0, 100.0, 0.0, start),
        // Gap up: true range reaches back to the previous close
        Candle::new(110.0, 111.0, 109.0, 110.0, 0.0, start + Duration::hours(1)),
    ];
    let atr = calculate_atr(&candles, 2);
    assert!((atr[1].unwrap() - (2.0 + 11.0) / 2.0).abs() < 1e-12);
}
