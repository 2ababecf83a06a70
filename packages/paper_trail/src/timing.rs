//! The per-operation timing session state machine.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use crate::event::{KEY_DURATION, KEY_ERROR, KEY_EVENT_NAME, KEY_EXCEPTION};
use crate::pal::Platform;
use crate::tracker::TrackerCore;
use crate::{EventData, PERFORMANCE_EVENT, TrackedEvent};

const NANOS_PER_MILLI: u128 = 1_000_000;

/// One in-flight timed operation.
///
/// A session is created when instrumentation begins, before the operation
/// runs, and is finalized exactly once through [`on_success`][Self::on_success]
/// or [`on_error`][Self::on_error]. Finalizing produces a single
/// [`PERFORMANCE_EVENT`] carrying the operation's rounded millisecond
/// duration, its outcome flag and any caller-supplied base values, queued for
/// deferred delivery.
///
/// Both finalizers consume the session, so finalizing twice does not compile.
/// A session that is dropped without being finalized - for example because the
/// operation it wraps never settles - emits no performance event at all; the
/// instrumentation layer does not invent durations for operations whose
/// outcome it never observed.
///
/// # Examples
///
/// ```
/// use paper_trail::{EventData, RecordingTransport, Tracker};
///
/// let transport = RecordingTransport::new();
/// let tracker = Tracker::new(transport.clone());
///
/// let session = tracker.start_tracking("index_project", EventData::new());
/// // ... the operation runs ...
/// session.on_success();
///
/// let events = transport.events();
/// assert_eq!(events[0].name, "performance");
/// assert_eq!(events[0].payload.get("error"), Some("0"));
/// ```
#[derive(Debug)]
#[must_use = "a session that is dropped without finalizing emits no performance event"]
pub struct TimingSession {
    core: Arc<TrackerCore>,
    event_name: String,
    session_id: u64,
    start_mark: String,
    started: Duration,
    values: EventData,
}

impl TimingSession {
    /// Starts a session: draws a fresh identifier, captures the start
    /// timestamp and issues the profiler start marker.
    pub(crate) fn new(core: Arc<TrackerCore>, event_name: String, values: EventData) -> Self {
        let session_id = core.next_session_id();
        let start_mark = format!("{event_name}_{session_id}_start");
        let started = core.platform().timestamp();

        if let Some(profiler) = core.profiler() {
            profiler.mark(&start_mark);
        }

        Self {
            core,
            event_name,
            session_id,
            start_mark,
            started,
            values,
        }
    }

    /// The identifier correlating this session's start marker with its
    /// eventual finalization. Unique among all sessions of the same tracker
    /// family for the lifetime of the process.
    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Name of the operation this session times.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Finalizes the session as successful.
    pub fn on_success(self) {
        self.finalize(None);
    }

    /// Finalizes the session as failed, recording the error's display text as
    /// the `exception` payload value.
    ///
    /// The error is only rendered, never consumed; the caller keeps and
    /// propagates the original value.
    pub fn on_error(self, error: impl Display) {
        let exception = error.to_string();
        self.finalize(Some(exception));
    }

    fn finalize(self, exception: Option<String>) {
        let Self {
            core,
            event_name,
            session_id: _,
            start_mark,
            started,
            values,
        } = self;

        if let Some(profiler) = core.profiler() {
            // Record the measurement for any attached profiling tool, then
            // clear both entries to bound the profiling buffer.
            profiler.measure(&event_name, &start_mark);
            profiler.clear_marks(&start_mark);
            profiler.clear_measures(&event_name);
        }

        let elapsed = core.platform().timestamp().saturating_sub(started);

        let mut payload = values;
        payload.insert(KEY_DURATION, round_to_millis(elapsed).to_string());
        payload.insert(KEY_EVENT_NAME, event_name);
        payload.insert(KEY_ERROR, if exception.is_some() { "1" } else { "0" });
        payload.insert(KEY_EXCEPTION, exception.unwrap_or_default());

        core.deliver_deferred(TrackedEvent {
            name: PERFORMANCE_EVENT.to_string(),
            payload,
            immediate: false,
        });
    }
}

/// Rounds a duration half-up to whole milliseconds.
fn round_to_millis(elapsed: Duration) -> u128 {
    elapsed
        .as_nanos()
        .saturating_add(500_000)
        .checked_div(NANOS_PER_MILLI)
        .expect("divisor is a nonzero constant")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::{FakePlatform, PlatformFacade};
    use crate::profiler::{ProfilerCall, RecordingProfiler};
    use crate::{RecordingTransport, Tracker};

    fn tracker_with_fake_clock() -> (Tracker, RecordingTransport, FakePlatform) {
        let transport = RecordingTransport::new();
        let platform = FakePlatform::new();
        let tracker = Tracker::builder(transport.clone())
            .platform(PlatformFacade::fake(platform.clone()))
            .build();
        (tracker, transport, platform)
    }

    #[test]
    fn success_emits_one_performance_event() {
        let (tracker, transport, platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking("op", EventData::new());
        platform.advance(Duration::from_millis(25));
        session.on_success();

        let events = transport.events();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.name, PERFORMANCE_EVENT);
        assert!(!event.immediate);
        assert_eq!(event.payload.get("eventName"), Some("op"));
        assert_eq!(event.payload.get("duration"), Some("25"));
        assert_eq!(event.payload.get("error"), Some("0"));
        assert_eq!(event.payload.get("exception"), Some(""));
    }

    #[test]
    fn error_records_display_text() {
        let (tracker, transport, _platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking("op", EventData::new());
        session.on_error("disk full");

        let event = &transport.events()[0];
        assert_eq!(event.payload.get("error"), Some("1"));
        assert_eq!(event.payload.get("exception"), Some("disk full"));
    }

    #[test]
    fn base_values_are_merged_into_payload() {
        let (tracker, transport, _platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking("op", EventData::new().with("project", "demo"));
        session.on_success();

        let event = &transport.events()[0];
        assert_eq!(event.payload.get("project"), Some("demo"));
    }

    #[test]
    fn fixed_keys_win_over_base_values() {
        let (tracker, transport, _platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking(
            "op",
            EventData::new()
                .with("duration", "fake")
                .with("error", "fake"),
        );
        session.on_success();

        let event = &transport.events()[0];
        assert_eq!(event.payload.get("duration"), Some("0"));
        assert_eq!(event.payload.get("error"), Some("0"));
    }

    #[test]
    fn duration_rounds_half_up() {
        let (tracker, transport, platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking("op", EventData::new());
        platform.advance(Duration::from_nanos(1_499_999));
        session.on_success();

        let session = tracker.start_tracking("op", EventData::new());
        platform.advance(Duration::from_nanos(1_500_000));
        session.on_success();

        let events = transport.events();
        assert_eq!(events[0].payload.get("duration"), Some("1"));
        assert_eq!(events[1].payload.get("duration"), Some("2"));
    }

    #[test]
    fn dropped_session_emits_nothing() {
        let (tracker, transport, _platform) = tracker_with_fake_clock();

        let session = tracker.start_tracking("op", EventData::new());
        drop(session);

        assert!(transport.is_empty());
    }

    #[test]
    fn sessions_draw_distinct_ids() {
        let (tracker, _transport, _platform) = tracker_with_fake_clock();

        let first = tracker.start_tracking("op", EventData::new());
        let second = tracker.start_tracking("op", EventData::new());

        assert_ne!(first.session_id(), second.session_id());
        assert_eq!(first.event_name(), "op");

        first.on_success();
        second.on_success();
    }

    #[test]
    fn profiler_receives_mark_measure_clear_sequence() {
        let transport = RecordingTransport::new();
        let profiler = RecordingProfiler::new();
        let tracker = Tracker::builder(transport)
            .platform(PlatformFacade::fake(FakePlatform::new()))
            .profiler(profiler.clone())
            .build();

        let session = tracker.start_tracking("op", EventData::new());
        let mark = format!("op_{}_start", session.session_id());
        session.on_success();

        assert_eq!(
            profiler.calls(),
            vec![
                ProfilerCall::Mark(mark.clone()),
                ProfilerCall::Measure("op".to_string(), mark.clone()),
                ProfilerCall::ClearMarks(mark),
                ProfilerCall::ClearMeasures("op".to_string()),
            ]
        );
    }

    #[test]
    fn rounding_helper_handles_boundaries() {
        assert_eq!(round_to_millis(Duration::ZERO), 0);
        assert_eq!(round_to_millis(Duration::from_nanos(499_999)), 0);
        assert_eq!(round_to_millis(Duration::from_nanos(500_000)), 1);
        assert_eq!(round_to_millis(Duration::from_millis(1)), 1);
    }

    static_assertions::assert_impl_all!(TimingSession: Send, Sync);
}
