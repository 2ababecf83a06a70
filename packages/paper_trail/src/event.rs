//! Event values exchanged between callers, the tracker and the transport.

use std::collections::HashMap;

/// Event name under which finalized timing sessions report their results.
pub const PERFORMANCE_EVENT: &str = "performance";

/// Payload key carrying the rounded operation duration in milliseconds.
pub(crate) const KEY_DURATION: &str = "duration";

/// Payload key carrying the name of the timed operation.
pub(crate) const KEY_EVENT_NAME: &str = "eventName";

/// Payload key carrying the outcome flag, `"0"` for success and `"1"` for failure.
pub(crate) const KEY_ERROR: &str = "error";

/// Payload key carrying the failure text, empty on success.
pub(crate) const KEY_EXCEPTION: &str = "exception";

/// A string key/value payload attached to a tracked event.
///
/// An empty payload is the default; callers with nothing to attach pass
/// [`EventData::new()`].
///
/// # Examples
///
/// ```
/// use paper_trail::EventData;
///
/// let values = EventData::new()
///     .with("file_type", "rust")
///     .with("line_count", "120");
///
/// assert_eq!(values.get("file_type"), Some("rust"));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventData {
    entries: HashMap<String, String>,
}

impl EventData {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one key/value pair, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts one key/value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value stored for the key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of key/value pairs in the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload carries no key/value pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the key/value pairs in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for EventData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, String)> for EventData {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// One named occurrence on its way to the delivery pipeline.
///
/// This value is transient: it is created per tracking call, handed to the
/// [`Transport`][crate::Transport] and not retained by the facade.
#[derive(Clone, Debug, Eq, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "the three fields are the whole transport contract; adding one would be a breaking change regardless"
)]
pub struct TrackedEvent {
    /// Name of the tracked event.
    pub name: String,

    /// Key/value payload attached to the event.
    pub payload: EventData,

    /// Whether the caller awaits delivery confirmation instead of relying on
    /// deferred batching.
    pub immediate: bool,
}

/// An event descriptor as produced by event streams: a name paired with its
/// payload, without a delivery mode.
///
/// Consumed by [`Tracker::track_event`][crate::Tracker::track_event] and
/// [`Tracker::track_events`][crate::Tracker::track_events].
#[derive(Clone, Debug, Eq, PartialEq)]
#[expect(
    clippy::exhaustive_structs,
    reason = "mirrors the shape of the descriptors emitted by event streams"
)]
pub struct TrackingEvent {
    /// Name of the event to track.
    pub name: String,

    /// Key/value payload attached to the event.
    pub data: EventData,
}
