//! Demonstrates timing instrumentation for synchronous and asynchronous
//! operations.
//!
//! Run with: `cargo run --example paper_trail_timing`.

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use futures::executor::block_on;
use paper_trail::{EventData, Outcome, RecordingTransport, SyncOutcome, Tracker};

fn main() {
    let transport = RecordingTransport::new();
    let tracker = Tracker::new(transport.clone());

    // A synchronous operation: the result comes back immediately and one
    // performance event is queued.
    let outcome = tracker.track_timing(
        "format_buffer",
        || {
            thread::sleep(Duration::from_millis(15));
            SyncOutcome::<_, Infallible>::ready("formatted")
        },
        EventData::new().with("language", "rust"),
    );
    let result = outcome
        .into_immediate()
        .expect("the operation completed synchronously");
    println!("synchronous operation returned: {result:?}");

    // An asynchronous operation: the session is finalized when the future
    // settles, not when the wrapper returns.
    let outcome = tracker.track_timing(
        "fetch_definitions",
        || {
            Outcome::pending(async {
                // A real host would await a network call here.
                Err::<Vec<String>, String>("connection reset".to_string())
            })
        },
        EventData::new(),
    );
    let result = block_on(outcome.finish());
    println!("asynchronous operation returned: {result:?}");

    // A session managed by hand, for callers whose success and failure paths
    // do not fit a single closure.
    let session = tracker.start_tracking("index_workspace", EventData::new());
    thread::sleep(Duration::from_millis(5));
    session.on_success();

    println!();
    println!("performance events:");
    for event in transport.events() {
        println!(
            "  {}: duration={}ms error={} exception={:?}",
            event.payload.get("eventName").unwrap_or("?"),
            event.payload.get("duration").unwrap_or("?"),
            event.payload.get("error").unwrap_or("?"),
            event.payload.get("exception").unwrap_or(""),
        );
    }
}
