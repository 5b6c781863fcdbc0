//! Unit tests for signal engine

use chrono::{Duration, TimeZone, Utc};
use aurum::config::SignalConfig;
use aurum::models::indicators::{Candle, IndicatorRow};
use aurum::models::signal::SignalDirection;
use aurum::signals::engine::{SignalEngine, MIN_CANDLES};
use aurum::signals::error::SignalError;

/// `count` identical rows carrying the given indicator values
fn rows(count: usize, fast: f64, slow: f64, atr: f64, adx: f64) -> Vec<IndicatorRow> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let candle = Candle::new(2055.0, 2056.0, 2054.0, 2055.0, 0.0, start + Duration::hours(i as i64));
            IndicatorRow::new(candle)
                .with_emas(fast, slow)
                .with_atr(atr)
                .with_adx(adx)
        })
        .collect()
}

#[test]
fn test_end_to_end_buy() {
    let higher = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let lower = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let signal = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(signal.symbol, "GC=F");
    assert_eq!(signal.direction, SignalDirection::Buy);
    // 50 base + 20 trend strength; ATR% 0.39 earns nothing, no sweep
    assert_eq!(signal.confidence, 70);
    assert_eq!(signal.stop, 2047.0);
    assert_eq!(signal.target, 2071.0);
    assert!((signal.size - 12.5).abs() < 1e-9);
    assert!((signal.potential_profit - 200.0).abs() < 1e-9);
    assert_eq!(signal.timestamp, lower.last().unwrap().candle.timestamp);
}

#[test]
fn test_sell_when_both_bearish() {
    let higher = rows(MIN_CANDLES, 2030.0, 2040.0, 8.0, 10.0);
    let lower = rows(MIN_CANDLES, 2030.0, 2040.0, 8.0, 10.0);
    let signal = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(signal.direction, SignalDirection::Sell);
    assert_eq!(signal.confidence, 50);
}

#[test]
fn test_disagreement_yields_no_signal() {
    let higher = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let lower = rows(250, 2030.0, 2040.0, 8.0, 30.0);
    let result = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_insufficient_history() {
    let higher = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let lower = rows(150, 2050.0, 2040.0, 8.0, 30.0);
    let result = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default());
    assert_eq!(
        result,
        Err(SignalError::InsufficientHistory {
            required: MIN_CANDLES,
            available: 150
        })
    );
}

#[test]
fn test_zero_atr_propagates() {
    let higher = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let lower = rows(250, 2050.0, 2040.0, 0.0, 30.0);
    let result = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default());
    assert_eq!(result, Err(SignalError::DivisionUndefined { atr: Some(0.0) }));
}

#[test]
fn test_sweep_raises_confidence() {
    let higher = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let mut lower = rows(250, 2050.0, 2040.0, 8.0, 30.0);
    let last = lower.last_mut().unwrap();
    last.candle.low = 2050.0;
    let signal = SignalEngine::evaluate("GC=F", &higher, &lower, &SignalConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(signal.confidence, 85);
}
