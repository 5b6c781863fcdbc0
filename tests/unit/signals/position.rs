//! Unit tests for position sizing

use chrono::Utc;
use aurum::config::SignalConfig;
use aurum::models::indicators::{Candle, IndicatorRow};
use aurum::models::signal::SignalDirection;
use aurum::signals::error::SignalError;
use aurum::signals::position::build_position;

fn row(close: f64, atr: Option<f64>) -> IndicatorRow {
    let mut row = IndicatorRow::new(Candle::new(close, close + 1.0, close - 1.0, close, 0.0, Utc::now()));
    row.atr = atr;
    row
}

#[test]
fn test_buy_position() {
    let config = SignalConfig::default();
    let signal = build_position("GC=F", SignalDirection::Buy, &row(2055.0, Some(8.0)), &config).unwrap();

    assert_eq!(signal.entry, 2055.0);
    assert_eq!(signal.stop, 2047.0);
    assert_eq!(signal.target, 2071.0);
    assert!((signal.size - 12.5).abs() < 1e-9);
    assert!((signal.potential_profit - 200.0).abs() < 1e-9);
    assert!((signal.risk_reward - 2.0).abs() < 1e-9);
    assert_eq!(signal.confidence, 0);
}

#[test]
fn test_sell_position_mirrors_buy() {
    let config = SignalConfig::default();
    let signal = build_position("GC=F", SignalDirection::Sell, &row(2055.0, Some(8.0)), &config).unwrap();

    assert_eq!(signal.stop, 2063.0);
    assert_eq!(signal.target, 2039.0);
    assert!((signal.size - 12.5).abs() < 1e-9);
    assert!((signal.potential_profit - 200.0).abs() < 1e-9);
}

#[test]
fn test_profit_equals_risk_times_rr() {
    let config = SignalConfig {
        rr_ratio: 3.0,
        account_balance: 25_000.0,
        ..SignalConfig::default()
    };
    let signal = build_position("GC=F", SignalDirection::Buy, &row(1980.0, Some(6.5)), &config).unwrap();
    let expected = config.risk_amount() * config.rr_ratio;
    assert!((signal.potential_profit - expected).abs() < 1e-6);
}

#[test]
fn test_zero_atr_is_undefined() {
    let config = SignalConfig::default();
    let err = build_position("GC=F", SignalDirection::Buy, &row(2055.0, Some(0.0)), &config).unwrap_err();
    assert_eq!(err, SignalError::DivisionUndefined { atr: Some(0.0) });
}

#[test]
fn test_missing_atr_is_undefined() {
    let config = SignalConfig::default();
    let err = build_position("GC=F", SignalDirection::Sell, &row(2055.0, None), &config).unwrap_err();
    assert_eq!(err, SignalError::DivisionUndefined { atr: None });
}

#[test]
fn test_nan_atr_is_undefined() {
    let config = SignalConfig::default();
    let result = build_position("GC=F", SignalDirection::Buy, &row(2055.0, Some(f64::NAN)), &config);
    assert!(matches!(result, Err(SignalError::DivisionUndefined { .. })));
}

#[test]
fn test_no_direction_rejected() {
    let config = SignalConfig::default();
    let result = build_position("GC=F", SignalDirection::None, &row(2055.0, Some(8.0)), &config);
    assert_eq!(result, Err(SignalError::NoDirection));
}

/// (close, atr, direction, balance, risk_per_trade, rr_ratio)
const CASES: &[(f64, f64, SignalDirection, f64, f64, f64)] = &[
    (2055.0, 8.0, SignalDirection::Buy, 10_000.0, 0.01, 2.0),
    (2055.0, 8.0, SignalDirection::Sell, 10_000.0, 0.01, 2.0),
    (1980.4, 6.5, SignalDirection::Buy, 25_000.0, 0.02, 3.0),
    (1980.4, 6.5, SignalDirection::Sell, 25_000.0, 0.02, 3.0),
    (2310.7, 0.35, SignalDirection::Sell, 5_000.0, 0.005, 1.5),
    (1.2345, 0.0012, SignalDirection::Buy, 50_000.0, 0.01, 2.5),
];

fn case_config(balance: f64, risk: f64, rr: f64) -> SignalConfig {
    SignalConfig {
        account_balance: balance,
        risk_per_trade: risk,
        rr_ratio: rr,
        ..SignalConfig::default()
    }
}

#[test]
fn test_build_position_is_idempotent() {
    for &(close, atr, direction, balance, risk, rr) in CASES {
        let config = case_config(balance, risk, rr);
        let latest = row(close, Some(atr));
        let first = build_position("GC=F", direction, &latest, &config).unwrap();
        let second = build_position("GC=F", direction, &latest, &config).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_size_times_risk_distance_equals_risk_amount() {
    for &(close, atr, direction, balance, risk, rr) in CASES {
        let config = case_config(balance, risk, rr);
        let signal = build_position("GC=F", direction, &row(close, Some(atr)), &config).unwrap();
        let risked = signal.size * (signal.entry - signal.stop).abs();
        assert!(
            (risked - config.risk_amount()).abs() < 1e-6 * config.risk_amount(),
            "close {} atr {} {:?}: risked {}",
            close,
            atr,
            direction,
            risked
        );
    }
}

#[test]
fn test_risk_reward_matches_configured_ratio() {
    for &(close, atr, direction, balance, risk, rr) in CASES {
        let config = case_config(balance, risk, rr);
        let signal = build_position("GC=F", direction, &row(close, Some(atr)), &config).unwrap();
        assert!(
            (signal.risk_reward - rr).abs() < 1e-6,
            "{:?} at {}: rr {}",
            direction,
            close,
            signal.risk_reward
        );
    }
}

#[test]
fn test_sell_risk_reward_equals_rr_ratio() {
    let config = SignalConfig::default();
    let signal = build_position("GC=F", SignalDirection::Sell, &row(2055.0, Some(8.0)), &config).unwrap();
    assert!((signal.risk_reward - config.rr_ratio).abs() < 1e-9);
    assert!(signal.stop > signal.entry);
    assert!(signal.target < signal.entry);
}
