//! Error conditions raised by the signal pipeline

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Empty or malformed candle series from the supplier
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// Position size would divide by a zero or undefined stop distance
    #[error("position size undefined (atr = {atr:?})")]
    DivisionUndefined { atr: Option<f64> },

    /// Sizing was requested for `SignalDirection::None`
    #[error("cannot size a position without a direction")]
    NoDirection,

    #[error("insufficient history: {available} candles, need {required}")]
    InsufficientHistory { required: usize, available: usize },
}
