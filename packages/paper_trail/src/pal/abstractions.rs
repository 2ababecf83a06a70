//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic high-resolution timestamps.
///
/// This trait abstracts the underlying clock, allowing for both the real
/// implementation (backed by [`std::time::Instant`]) and a fake implementation
/// for testing. Readings are relative to platform creation and never follow
/// wall-clock adjustments, so subtracting two readings always yields a
/// non-negative duration.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Elapsed monotonic time since this platform instance was created.
    fn timestamp(&self) -> Duration;
}
