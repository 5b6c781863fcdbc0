//! Yahoo Finance candle supplier

pub mod provider;

pub use provider::YahooMarketDataProvider;
