//! Shared data models spanning the engine layers.

pub mod backtest;
pub mod indicators;
pub mod signal;

pub use backtest::BacktestResult;
pub use indicators::{Candle, IndicatorRow};
pub use signal::{SignalDirection, SignalKey, TradeSignal};
