//! Mutable state carried between scan cycles

use crate::models::signal::SignalKey;
use chrono::{DateTime, Duration, Utc};

/// State owned by the scan loop and passed into every cycle.
///
/// The loop task is the only writer; core functions never see it.
#[derive(Debug, Clone, Default)]
pub struct OrchestrationContext {
    /// Key of the most recently emitted signal
    pub last_signal: Option<SignalKey>,
    pub last_heartbeat: Option<DateTime<Utc>>,
}

impl OrchestrationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A heartbeat is due when none was sent yet or more than `interval` passed.
    pub fn heartbeat_due(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        match self.last_heartbeat {
            Some(last) => now - last > interval,
            None => true,
        }
    }

    pub fn record_heartbeat(&mut self, now: DateTime<Utc>) {
        self.last_heartbeat = Some(now);
    }

    pub fn is_duplicate(&self, key: &SignalKey) -> bool {
        self.last_signal.as_ref() == Some(key)
    }

    pub fn record_signal(&mut self, key: SignalKey) {
        self.last_signal = Some(key);
    }
}
