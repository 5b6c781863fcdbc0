//! Indicator library: EMA, ATR and ADX series aligned with their candles.

pub mod rows;
pub mod trend;
pub mod volatility;

pub use rows::*;
