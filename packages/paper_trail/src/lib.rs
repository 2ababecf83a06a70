//! Structured usage and performance event tracking with timing correlation.
//!
//! This package is an in-process instrumentation facade: it packages named,
//! key/value-tagged events and hands them to an external delivery pipeline,
//! and it measures the duration and outcome of individual operations via a
//! per-operation timing session.
//!
//! The core functionality includes:
//! - [`Tracker`] - The instrumentation context exposing all tracking operations
//! - [`TimingSession`] - One in-flight timed operation, finalized into a single
//!   performance event
//! - [`Outcome`] - Tagged synchronous/asynchronous operation result consumed by
//!   [`Tracker::track_timing`]
//! - [`Transport`] - The seam toward the actual delivery pipeline
//! - [`Profiler`] - Optional platform profiling capability for external
//!   profiling tools
//!
//! The package is runtime-agnostic: it reacts to the completion of
//! caller-supplied asynchronous operations but never spawns tasks, blocks or
//! assumes an ambient executor.
//!
//! # Tracking events
//!
//! ```
//! use paper_trail::{EventData, RecordingTransport, Tracker};
//!
//! let transport = RecordingTransport::new();
//! let tracker = Tracker::new(transport.clone());
//!
//! tracker.track("app_started", EventData::new().with("version", "1.2.3"));
//!
//! assert_eq!(transport.len(), 1);
//! ```
//!
//! # Timing an operation
//!
//! Synchronous operations complete immediately; the result is returned
//! unchanged and one `performance` event is queued:
//!
//! ```
//! use std::convert::Infallible;
//!
//! use paper_trail::{EventData, RecordingTransport, SyncOutcome, Tracker};
//!
//! let transport = RecordingTransport::new();
//! let tracker = Tracker::new(transport.clone());
//!
//! let outcome = tracker.track_timing(
//!     "load_config",
//!     || SyncOutcome::<_, Infallible>::ready(42),
//!     EventData::new(),
//! );
//!
//! let result = outcome.into_immediate().expect("operation was synchronous");
//! assert_eq!(result, Ok(42));
//! assert_eq!(transport.len(), 1);
//! ```
//!
//! Asynchronous operations are finalized when their future settles:
//!
//! ```
//! use futures::executor::block_on;
//!
//! use paper_trail::{EventData, Outcome, RecordingTransport, Tracker};
//!
//! let transport = RecordingTransport::new();
//! let tracker = Tracker::new(transport.clone());
//!
//! let outcome = tracker.track_timing(
//!     "fetch_remote",
//!     || Outcome::pending(async { Ok::<_, String>("ok") }),
//!     EventData::new(),
//! );
//!
//! // Nothing is tracked until the operation settles.
//! assert!(transport.is_empty());
//!
//! let result = block_on(outcome.finish());
//! assert_eq!(result.as_deref(), Ok("ok"));
//! assert_eq!(transport.len(), 1);
//! ```
//!
//! # Threading
//!
//! A [`Tracker`] is a clonable handle; clones share the delivery pipeline and
//! the session identifier counter, so concurrently started timing sessions
//! always receive distinct identifiers. All public types are thread-safe where
//! their type parameters allow.

mod event;
mod outcome;
mod pal;
mod profiler;
mod stream;
mod timing;
mod tracker;
mod transport;

pub use event::{EventData, PERFORMANCE_EVENT, TrackedEvent, TrackingEvent};
pub use outcome::{Outcome, SyncOutcome};
pub use profiler::Profiler;
pub use stream::{EventStreamForwarder, Subscription};
pub use timing::TimingSession;
pub use tracker::{Tracker, TrackerBuilder};
pub use transport::{DeliveryError, DeliveryFuture, NullTransport, RecordingTransport, Transport};

/// Expectation message used when locking mutexes whose guarded operations
/// cannot panic, making poisoning impossible in practice.
pub(crate) const ERR_POISONED_LOCK: &str = "lock is never poisoned - guarded code does not panic";
