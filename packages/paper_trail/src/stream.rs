//! Forwarding event streams into the tracker.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use futures::StreamExt;
use futures::task::AtomicWaker;

use crate::{Tracker, TrackingEvent};

#[derive(Debug, Default)]
struct SubscriptionState {
    disposed: AtomicBool,
    waker: AtomicWaker,
}

/// Drives a stream of event descriptors into the tracker.
///
/// Created by [`Tracker::track_events`]. A pure forwarding subscriber: each
/// descriptor the stream produces is handed to
/// [`Tracker::track_event`][crate::Tracker::track_event] as it arrives,
/// with no buffering beyond what the stream itself buffers. Completes when
/// the stream ends or the paired [`Subscription`] is disposed.
///
/// The forwarder is an ordinary future; the caller drives it on whatever
/// executor it has, or blocks on it. It never spawns anything itself.
#[must_use = "the forwarder tracks nothing unless polled"]
pub struct EventStreamForwarder<S> {
    tracker: Tracker,
    events: S,
    state: Arc<SubscriptionState>,
}

/// Handle that stops a [`Tracker::track_events`] subscription.
///
/// Disposing the handle (explicitly or by dropping it) stops the forwarder:
/// no descriptor produced afterwards reaches the transport. Call
/// [`detach`][Self::detach] instead to let the forwarder run until the stream
/// ends.
#[derive(Debug)]
pub struct Subscription {
    state: Arc<SubscriptionState>,
    detached: bool,
}

impl Subscription {
    /// Stops the subscription.
    ///
    /// Equivalent to dropping the handle; provided so call sites can make the
    /// intent explicit.
    pub fn dispose(self) {
        // Drop does the work.
    }

    /// Relinquishes the handle without stopping the subscription; the
    /// forwarder keeps tracking until its stream ends.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }

        self.state.disposed.store(true, Ordering::Release);

        // Wake the forwarder so it can observe disposal and complete instead
        // of idling on a stream that will never be consumed again.
        self.state.waker.wake();
    }
}

pub(crate) fn subscribe<S>(tracker: Tracker, events: S) -> (EventStreamForwarder<S>, Subscription)
where
    S: Stream<Item = TrackingEvent> + Unpin,
{
    let state = Arc::new(SubscriptionState::default());

    (
        EventStreamForwarder {
            tracker,
            events,
            state: Arc::clone(&state),
        },
        Subscription {
            state,
            detached: false,
        },
    )
}

impl<S> Future for EventStreamForwarder<S>
where
    S: Stream<Item = TrackingEvent> + Unpin,
{
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        this.state.waker.register(cx.waker());

        loop {
            if this.state.disposed.load(Ordering::Acquire) {
                return Poll::Ready(());
            }

            match this.events.poll_next_unpin(cx) {
                Poll::Ready(Some(event)) => this.tracker.track_event(event),
                Poll::Ready(None) => return Poll::Ready(()),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S> fmt::Debug for EventStreamForwarder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStreamForwarder")
            .field("tracker", &self.tracker)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
