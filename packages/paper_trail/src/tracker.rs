//! The instrumentation context and its tracking operations.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::Stream;
use futures::future;
use rand::Rng;

use crate::pal::PlatformFacade;
use crate::stream::{self, EventStreamForwarder, Subscription};
use crate::{
    DeliveryFuture, EventData, Outcome, Profiler, TimingSession, TrackedEvent, TrackingEvent,
    Transport,
};

/// State shared between a tracker, its clones and the timing sessions it
/// hands out.
#[derive(Debug)]
pub(crate) struct TrackerCore {
    transport: Box<dyn Transport>,
    platform: PlatformFacade,
    profiler: Option<Box<dyn Profiler>>,

    /// Session identifier counter. Incremented for every session ever started
    /// through this tracker family, never decremented or reset.
    session_count: AtomicU64,
}

impl TrackerCore {
    pub(crate) fn next_session_id(&self) -> u64 {
        self.session_count.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn platform(&self) -> &PlatformFacade {
        &self.platform
    }

    pub(crate) fn profiler(&self) -> Option<&dyn Profiler> {
        self.profiler.as_deref()
    }

    /// Hands one event to the transport for deferred delivery, dropping any
    /// confirmation future unpolled.
    pub(crate) fn deliver_deferred(&self, event: TrackedEvent) {
        drop(self.transport.deliver(event));
    }
}

/// The instrumentation context: packages events and hands them to the
/// delivery pipeline, and starts timing sessions for individual operations.
///
/// A tracker is a clonable handle; clones share the transport, the optional
/// profiler and the session identifier counter. Inject one tracker family per
/// process to get process-wide unique session identifiers without hidden
/// global state.
///
/// # Examples
///
/// ```
/// use paper_trail::{EventData, RecordingTransport, Tracker};
///
/// let transport = RecordingTransport::new();
/// let tracker = Tracker::new(transport.clone());
///
/// tracker.track("file_saved", EventData::new().with("file_type", "rust"));
/// tracker.track("file_saved", EventData::new());
///
/// assert_eq!(transport.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Tracker {
    core: Arc<TrackerCore>,
}

impl Tracker {
    /// Creates a tracker delivering through the given transport, with no
    /// profiler attached.
    #[must_use]
    pub fn new(transport: impl Transport) -> Self {
        Self::builder(transport).build()
    }

    /// Starts building a tracker delivering through the given transport.
    #[must_use]
    pub fn builder(transport: impl Transport) -> TrackerBuilder {
        TrackerBuilder {
            transport: Box::new(transport),
            platform: PlatformFacade::real(),
            profiler: None,
        }
    }

    /// Tracks a set of values against a named event.
    ///
    /// Fire-and-forget: the event is queued for batched delivery in the
    /// background and nothing is reported back, not even delivery failure.
    pub fn track(&self, event_name: impl Into<String>, values: EventData) {
        self.core.deliver_deferred(TrackedEvent {
            name: event_name.into(),
            payload: values,
            immediate: false,
        });
    }

    /// Same as [`track`][Self::track], except delivery is requested
    /// immediately and the returned future settles when the transport confirms
    /// completion.
    ///
    /// If the transport reports nothing in flight, the returned future is
    /// already resolved. Transport failures surface as the future's error.
    #[must_use = "the future reports delivery completion; drop it only if completion is irrelevant"]
    pub fn track_immediate(
        &self,
        event_name: impl Into<String>,
        values: EventData,
    ) -> DeliveryFuture {
        let event = TrackedEvent {
            name: event_name.into(),
            payload: values,
            immediate: true,
        };

        self.core
            .transport
            .deliver(event)
            .unwrap_or_else(|| future::ready(Ok(())).boxed())
    }

    /// An alternative interface for [`track`][Self::track] that accepts a
    /// single event descriptor. Particularly useful when dealing with event
    /// streams.
    pub fn track_event(&self, event: TrackingEvent) {
        self.track(event.name, event.data);
    }

    /// Tracks each descriptor produced by a stream of events.
    ///
    /// Returns the forwarder future that drives the stream and a subscription
    /// handle. The caller runs the forwarder on whatever executor it has (or
    /// blocks on it); the forwarder forwards descriptors one at a time,
    /// buffering nothing beyond what the stream itself buffers, and completes
    /// when the stream ends or the subscription is disposed.
    ///
    /// ```
    /// use futures::executor::block_on;
    /// use futures::stream;
    ///
    /// use paper_trail::{EventData, RecordingTransport, Tracker, TrackingEvent};
    ///
    /// let transport = RecordingTransport::new();
    /// let tracker = Tracker::new(transport.clone());
    ///
    /// let events = stream::iter(vec![TrackingEvent {
    ///     name: "completion_accepted".to_string(),
    ///     data: EventData::new(),
    /// }]);
    ///
    /// let (forwarder, subscription) = tracker.track_events(events);
    /// subscription.detach();
    /// block_on(forwarder);
    ///
    /// assert_eq!(transport.len(), 1);
    /// ```
    pub fn track_events<S>(&self, events: S) -> (EventStreamForwarder<S>, Subscription)
    where
        S: Stream<Item = TrackingEvent> + Unpin,
    {
        stream::subscribe(self.clone(), events)
    }

    /// A sampled version of [`track`][Self::track] that only tracks roughly
    /// every `1 / sample_rate` calls.
    ///
    /// One uniform random draw in `[0, 1)` decides each call: the event is
    /// tracked when `draw * sample_rate <= 1`. Rates at or below one
    /// (including the caller-error territory of zero and negative rates)
    /// therefore always track.
    #[cfg_attr(test, mutants::skip)] // The random draw makes mutations flaky to detect; covered statistically.
    pub fn track_sampled(&self, event_name: impl Into<String>, sample_rate: f64, values: EventData) {
        let draw = rand::rng().random::<f64>();
        if draw * sample_rate <= 1.0 {
            self.track(event_name, values);
        }
    }

    /// Starts a timing session for callers that signal success or failure
    /// themselves.
    ///
    /// The clock starts now. The session must be finalized on every exit path
    /// of the operation it wraps; see [`TimingSession`].
    pub fn start_tracking(
        &self,
        event_name: impl Into<String>,
        values: EventData,
    ) -> TimingSession {
        TimingSession::new(Arc::clone(&self.core), event_name.into(), values)
    }

    /// Reports analytics including timing for a single operation.
    ///
    /// The operation reports through [`Outcome`] whether it completed
    /// synchronously or is still pending. Exactly one performance event is
    /// emitted per invocation - immediately for synchronous completions, and
    /// when the operation's future settles otherwise - and the operation's
    /// result reaches the caller unchanged in value and error. Failure values
    /// are rendered into the event payload but never swallowed or rewritten.
    ///
    /// The performance event is queued, not awaited, so instrumentation adds
    /// no delivery latency to the operation itself.
    ///
    /// ```
    /// use std::convert::Infallible;
    ///
    /// use paper_trail::{EventData, RecordingTransport, SyncOutcome, Tracker};
    ///
    /// let transport = RecordingTransport::new();
    /// let tracker = Tracker::new(transport.clone());
    ///
    /// let outcome = tracker.track_timing(
    ///     "parse_buffer",
    ///     || SyncOutcome::<_, Infallible>::ready("parsed"),
    ///     EventData::new(),
    /// );
    ///
    /// assert_eq!(outcome.into_immediate(), Some(Ok("parsed")));
    /// assert_eq!(transport.len(), 1);
    /// ```
    pub fn track_timing<T, E, F>(
        &self,
        event_name: impl Into<String>,
        operation: impl FnOnce() -> Outcome<T, E, F>,
        values: EventData,
    ) -> Outcome<T, E, impl Future<Output = Result<T, E>>>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        let session = self.start_tracking(event_name, values);

        match operation() {
            Outcome::Immediate(Ok(value)) => {
                session.on_success();
                Outcome::Immediate(Ok(value))
            }
            Outcome::Immediate(Err(error)) => {
                // Finalized before the failure propagates; the caller observes
                // the original error unchanged.
                session.on_error(&error);
                Outcome::Immediate(Err(error))
            }
            Outcome::Pending(operation_future) => Outcome::Pending(async move {
                match operation_future.await {
                    Ok(value) => {
                        session.on_success();
                        Ok(value)
                    }
                    Err(error) => {
                        session.on_error(&error);
                        Err(error)
                    }
                }
            }),
        }
    }
}

/// Builder for [`Tracker`] instances that need more than a transport.
#[derive(Debug)]
pub struct TrackerBuilder {
    transport: Box<dyn Transport>,
    platform: PlatformFacade,
    profiler: Option<Box<dyn Profiler>>,
}

impl TrackerBuilder {
    /// Attaches a platform profiling capability.
    ///
    /// When attached, every timing session issues a start marker named
    /// `{event_name}_{session_id}_start` at construction and a measurement
    /// spanning that marker at finalization.
    #[must_use]
    pub fn profiler(mut self, profiler: impl Profiler) -> Self {
        self.profiler = Some(Box::new(profiler));
        self
    }

    /// Substitutes the clock, so tests control measured durations.
    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: PlatformFacade) -> Self {
        self.platform = platform;
        self
    }

    /// Builds the tracker.
    #[must_use]
    pub fn build(self) -> Tracker {
        Tracker {
            core: Arc::new(TrackerCore {
                transport: self.transport,
                platform: self.platform,
                profiler: self.profiler,
                session_count: AtomicU64::new(0),
            }),
        }
    }
}
