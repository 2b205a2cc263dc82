//! Deterministic clocks.

use chrono::{DateTime, Utc};
use overlay_core::Clock;

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(DateTime<Utc>);

impl FrozenClock {
    /// Freeze at the given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
