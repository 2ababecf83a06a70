//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation lets tests control the clock instead of relying on the
/// real one. Multiple clones of the same `FakePlatform` share the same
/// underlying reading, allowing tests to advance time after the platform has
/// been handed to a tracker.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    timestamp: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a new fake platform with a zero reading.
    pub(crate) fn new() -> Self {
        Self {
            timestamp: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Sets the clock reading.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// time progression during a measurement.
    pub(crate) fn set_timestamp(&self, timestamp: Duration) {
        *self
            .timestamp
            .lock()
            .expect("FakePlatform state lock should not be poisoned") = timestamp;
    }

    /// Advances the clock reading by the given amount.
    pub(crate) fn advance(&self, by: Duration) {
        let mut timestamp = self
            .timestamp
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *timestamp = timestamp.saturating_add(by);
    }
}

impl Platform for FakePlatform {
    fn timestamp(&self) -> Duration {
        *self
            .timestamp
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_reading() {
        let platform = FakePlatform::new();
        assert_eq!(platform.timestamp(), Duration::ZERO);
    }

    #[test]
    fn sets_reading() {
        let platform = FakePlatform::new();
        platform.set_timestamp(Duration::from_millis(150));

        assert_eq!(platform.timestamp(), Duration::from_millis(150));
    }

    #[test]
    fn advance_accumulates() {
        let platform = FakePlatform::new();
        platform.advance(Duration::from_millis(10));
        platform.advance(Duration::from_millis(5));

        assert_eq!(platform.timestamp(), Duration::from_millis(15));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.set_timestamp(Duration::from_millis(100));
        assert_eq!(platform2.timestamp(), Duration::from_millis(100));
    }
}
