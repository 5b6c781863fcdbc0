//! Orchestration: scan cycle, scheduling, health endpoint

pub mod context;
pub mod http;
pub mod messages;
pub mod runtime;
pub mod scheduler;

pub use context::OrchestrationContext;
pub use http::*;
pub use runtime::*;
pub use scheduler::*;
