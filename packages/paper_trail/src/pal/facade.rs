//! Dispatch between the real and fake platform implementations.

use std::time::Duration;

#[cfg(test)]
use crate::pal::FakePlatform;
use crate::pal::{Platform, RealPlatform};

/// Routes clock access to either the real platform or a test fake.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    Real(RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Creates a facade over the real monotonic clock, with its epoch captured
    /// now.
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform::new())
    }

    #[cfg(test)]
    pub(crate) fn fake(fake: FakePlatform) -> Self {
        Self::Fake(fake)
    }
}

impl Platform for PlatformFacade {
    fn timestamp(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.timestamp(),
            #[cfg(test)]
            Self::Fake(platform) => platform.timestamp(),
        }
    }
}

impl From<RealPlatform> for PlatformFacade {
    fn from(platform: RealPlatform) -> Self {
        Self::Real(platform)
    }
}

#[cfg(test)]
impl From<FakePlatform> for PlatformFacade {
    fn from(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_facade_reads_fake_clock() {
        let fake = FakePlatform::new();
        fake.set_timestamp(Duration::from_millis(42));

        let facade = PlatformFacade::fake(fake);
        assert_eq!(facade.timestamp(), Duration::from_millis(42));
    }

    #[test]
    #[cfg(not(miri))] // Miri cannot talk to the real platform.
    fn real_facade_reads_real_clock() {
        let facade = PlatformFacade::real();
        assert!(facade.timestamp() < Duration::from_secs(1));
    }

    static_assertions::assert_impl_all!(PlatformFacade: Send, Sync);
}
