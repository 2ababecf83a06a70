//! The seam toward the external delivery pipeline.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::{ERR_POISONED_LOCK, TrackedEvent};

/// Future confirming delivery of one tracked event, or reporting why it failed.
pub type DeliveryFuture = BoxFuture<'static, Result<(), DeliveryError>>;

/// Errors reported by the delivery pipeline.
///
/// These surface only through the future returned by
/// [`Tracker::track_immediate`][crate::Tracker::track_immediate]; deferred and
/// sampled tracking never report back, their only failure mode being silent
/// non-delivery.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum DeliveryError {
    /// The pipeline refused to accept the event.
    #[error("the delivery pipeline rejected the event: {reason}")]
    Rejected {
        /// A human-readable description of the refusal.
        reason: String,
    },

    /// The pipeline has shut down and accepts no further events.
    #[error("the delivery pipeline has shut down")]
    Closed,
}

/// The actual delivery mechanism that serializes and ships events off-process.
///
/// The facade makes exactly one `deliver` call per tracked event. Returning
/// `None` means the event was accepted with nothing in flight to await;
/// returning a future lets callers of
/// [`Tracker::track_immediate`][crate::Tracker::track_immediate] observe
/// delivery completion. For deferred tracking any returned future is dropped
/// unpolled.
pub trait Transport: Debug + Send + Sync + 'static {
    /// Accepts one event for delivery.
    fn deliver(&self, event: TrackedEvent) -> Option<DeliveryFuture>;
}

/// A transport that discards every event.
///
/// Useful for hosts that disable analytics while keeping instrumentation call
/// sites in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTransport;

impl NullTransport {
    /// Creates a transport that discards every event.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Transport for NullTransport {
    fn deliver(&self, _event: TrackedEvent) -> Option<DeliveryFuture> {
        None
    }
}

/// A transport that records every delivered event in memory.
///
/// Clones share the same underlying storage, so a clone handed to a
/// [`Tracker`][crate::Tracker] can be inspected through the original handle.
/// Intended for tests and examples, both this crate's own and those of host
/// applications.
///
/// # Examples
///
/// ```
/// use paper_trail::{EventData, RecordingTransport, Tracker};
///
/// let transport = RecordingTransport::new();
/// let tracker = Tracker::new(transport.clone());
///
/// tracker.track("opened_file", EventData::new());
///
/// let events = transport.events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].name, "opened_file");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    events: Arc<Mutex<Vec<TrackedEvent>>>,
}

impl RecordingTransport {
    /// Creates a transport with empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events delivered so far, in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Number of events delivered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no event has been delivered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

impl Transport for RecordingTransport {
    fn deliver(&self, event: TrackedEvent) -> Option<DeliveryFuture> {
        self.events.lock().expect(ERR_POISONED_LOCK).push(event);
        None
    }
}
