//! Demonstration workload
//!
//! Three simulated operations per iteration, each sleeping a little longer on
//! every pass so the recorded latencies trend upward.

use std::thread;
use std::time::Duration;

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::tracker::LatencyTracker;

/// Simulated operations as `(label, base seconds, growth per iteration)`
pub const OPERATIONS: [(&str, f64, f64); 3] = [
    ("operation_1", 0.1, 0.02),
    ("operation_2", 0.2, 0.03),
    ("operation_3", 0.15, 0.01),
];

/// Sleep duration of one operation at `iteration`, scaled by `time_scale`
///
/// Negative results clamp to zero; NaN, infinite or overflowing results are
/// `InvalidDuration`.
pub fn operation_duration(
    base: f64,
    growth: f64,
    iteration: usize,
    time_scale: f64,
) -> Result<Duration> {
    let seconds = (base + growth * iteration as f64) * time_scale;
    if !seconds.is_finite() {
        return Err(TrackerError::InvalidDuration(seconds));
    }
    Duration::try_from_secs_f64(seconds.max(0.0))
        .map_err(|_| TrackerError::InvalidDuration(seconds))
}

/// Run `iterations` passes of the workload into `tracker`
pub fn run<C: Clock>(tracker: &mut LatencyTracker<C>, iterations: usize, time_scale: f64) -> Result<()> {
    tracing::debug!(iterations, time_scale, "running demo workload");
    for i in 0..iterations {
        for (label, base, growth) in OPERATIONS {
            let pause = operation_duration(base, growth, i, time_scale)?;
            tracker.measure(label, || thread::sleep(pause))?;
        }
    }
    Ok(())
}
