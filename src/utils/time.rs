//! Time and timestamp utilities

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Clock that never hands out a time earlier than one it already issued.
///
/// Wall-clock adjustments can move `Utc::now()` backwards; messages are
/// stamped from this clock so insertion order stays non-decreasing.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that will not issue anything earlier than `floor`
    pub fn starting_at(floor: Option<DateTime<Utc>>) -> Self {
        Self {
            last: Mutex::new(floor),
        }
    }

    /// Current time, clamped to the last issued value
    pub fn now(&self) -> DateTime<Utc> {
        self.observe(Utc::now())
    }

    fn observe(&self, candidate: DateTime<Utc>) -> DateTime<Utc> {
        let mut last = self.last.lock();
        let issued = match *last {
            Some(prev) if candidate < prev => prev,
            _ => candidate,
        };
        *last = Some(issued);
        issued
    }

    /// Last value handed out, if any
    pub fn last_issued(&self) -> Option<DateTime<Utc>> {
        *self.last.lock()
    }
}
