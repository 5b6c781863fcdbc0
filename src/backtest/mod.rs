//! Historical validation of the trend-continuation entry rule.

pub mod engine;

pub use engine::*;
