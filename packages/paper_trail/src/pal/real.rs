//! Real platform implementation backed by the standard library clock.

use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Monotonic clock readings relative to an epoch captured at construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RealPlatform {
    epoch: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    fn timestamp(&self) -> Duration {
        self.epoch.elapsed()
    }
}

#[cfg(test)]
#[cfg(not(miri))] // Miri cannot talk to the real platform.
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let platform = RealPlatform::new();

        let first = platform.timestamp();
        let second = platform.timestamp();

        assert!(second >= first);
    }

    #[test]
    fn fresh_platform_starts_near_zero() {
        let platform = RealPlatform::new();
        assert!(platform.timestamp() < Duration::from_secs(1));
    }
}
