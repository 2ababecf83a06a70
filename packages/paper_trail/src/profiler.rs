//! Optional platform profiling capability.

use std::fmt::Debug;

/// A platform profiling facility such as a devtools timeline.
///
/// Injected once at tracker construction via
/// [`TrackerBuilder::profiler`][crate::TrackerBuilder::profiler]; absent by
/// default. When present, each timing session issues a named start marker at
/// construction and a measurement spanning the marker at finalization, so an
/// attached profiler can correlate tracked operations with its own timeline.
///
/// All calls are best-effort and have no effect on the analytics payloads.
pub trait Profiler: Debug + Send + Sync + 'static {
    /// Places a named marker at the current point in time.
    fn mark(&self, id: &str);

    /// Records a named measurement spanning from the given marker to now.
    fn measure(&self, name: &str, start_id: &str);

    /// Removes the named marker to bound profiling buffer growth.
    fn clear_marks(&self, id: &str);

    /// Removes the named measurement to bound profiling buffer growth.
    fn clear_measures(&self, name: &str);
}

#[cfg(test)]
pub(crate) use recording::{ProfilerCall, RecordingProfiler};


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_profiler_logs_calls_in_order() {
        let profiler = RecordingProfiler::new();

        profiler.mark("op_0_start");
        profiler.measure("op", "op_0_start");
        profiler.clear_marks("op_0_start");
        profiler.clear_measures("op");

        assert_eq!(
            profiler.calls(),
            vec![
                ProfilerCall::Mark("op_0_start".to_string()),
                ProfilerCall::Measure("op".to_string(), "op_0_start".to_string()),
                ProfilerCall::ClearMarks("op_0_start".to_string()),
                ProfilerCall::ClearMeasures("op".to_string()),
            ]
        );
    }

    static_assertions::assert_impl_all!(RecordingProfiler: Send, Sync);
}
