//! Simplified example demonstrating key `paper_trail` types working together.
//!
//! This example shows how to use the main types in the `paper_trail` package:
//! - `Tracker`: the instrumentation context exposing the tracking operations
//! - `EventData`: key/value payloads attached to tracked events
//! - `RecordingTransport`: an in-memory transport standing in for the real
//!   delivery pipeline
//!
//! Run with: `cargo run --example paper_trail_basic`.

use futures::executor::block_on;
use paper_trail::{EventData, RecordingTransport, Tracker};

fn main() {
    println!("=== Usage Event Tracking Example ===");
    println!();

    // A real host would hand the tracker its batching delivery pipeline; the
    // recording transport lets this example inspect what would be shipped.
    let transport = RecordingTransport::new();
    let tracker = Tracker::new(transport.clone());
    println!("✓ Created tracker");
    println!();

    // Deferred tracking: queued for batched delivery, nothing to await.
    tracker.track(
        "file_opened",
        EventData::new()
            .with("file_type", "rust")
            .with("line_count", "240"),
    );
    println!("✓ Tracked a deferred event");

    // Immediate tracking: the returned future settles when the transport
    // confirms delivery.
    let delivery = tracker.track_immediate("session_ended", EventData::new());
    block_on(delivery).expect("the recording transport never fails");
    println!("✓ Tracked an immediate event");

    // Sampled tracking: roughly one call in ten is tracked.
    for _ in 0..100 {
        tracker.track_sampled("keystroke", 10.0, EventData::new());
    }
    println!("✓ Tracked 100 keystrokes at sample rate 10");
    println!();

    println!("Events that reached the transport:");
    for event in transport.events() {
        println!(
            "  {} (immediate: {}, {} payload entries)",
            event.name,
            event.immediate,
            event.payload.len()
        );
    }
}
