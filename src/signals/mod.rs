//! Signal evaluation: trend classification, sweep detection, confidence
//! scoring and position sizing.

pub mod engine;
pub mod error;
pub mod position;
pub mod scoring;
pub mod sweep;
pub mod trend;

pub use engine::*;
pub use error::SignalError;
pub use position::*;
pub use scoring::*;
pub use sweep::*;
pub use trend::*;
