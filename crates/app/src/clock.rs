//! Wall clock abstraction.

use std::fmt::Debug;

use jiff::Timestamp;

/// Source of the current time.
pub trait Clock: Debug + Send + Sync {
    /// Current wall time, truncated to whole microseconds.
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        truncate_to_micros(Timestamp::now())
    }
}

/// Drop sub-microsecond precision so timestamps survive a `PostgreSQL` round trip unchanged.
#[must_use]
pub fn truncate_to_micros(timestamp: Timestamp) -> Timestamp {
    Timestamp::from_microsecond(timestamp.as_microsecond()).unwrap_or(timestamp)
}

#[cfg(test)]
pub(crate) mod manual {
    use std::sync::Mutex;

    use jiff::{SignedDuration, Timestamp};

    use super::Clock;

    /// A clock that only moves when told to.
    #[derive(Debug)]
    pub(crate) struct ManualClock {
        now: Mutex<Timestamp>,
    }

    impl ManualClock {
        pub(crate) fn new(start: Timestamp) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        pub(crate) fn set(&self, to: Timestamp) {
            if let Ok(mut now) = self.now.lock() {
                *now = to;
            }
        }

        pub(crate) fn advance(&self, by: SignedDuration) {
            if let Ok(mut now) = self.now.lock()
                && let Ok(next) = now.checked_add(by)
            {
                *now = next;
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            self.now
                .lock()
                .map_or(Timestamp::UNIX_EPOCH, |now| *now)
        }
    }
}
