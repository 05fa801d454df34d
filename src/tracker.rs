//! Label registry and start/stop timing protocol
//!
//! `LatencyTracker` owns one [`Series`] per label, keyed in first-seen order.
//! Every captured time is `round(clock, precision) - epoch`, where the epoch is
//! the rounded clock reading at construction.

use indexmap::IndexMap;

use crate::clock::{round_to, Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::series::Series;
use crate::stats::LatencySummary;

/// Records per-label latency series
///
/// # Example
/// ```
/// use tmark::clock::ManualClock;
/// use tmark::config::TrackerConfig;
/// use tmark::tracker::LatencyTracker;
///
/// let clock = ManualClock::new(1_000.0);
/// let mut tracker = LatencyTracker::with_clock(clock.clone(), TrackerConfig::default());
///
/// tracker.start("load")?;
/// clock.advance(0.25);
/// tracker.stop("load")?;
///
/// assert_eq!(tracker.series("load").unwrap().latencies(), &[0.25]);
/// # Ok::<(), tmark::TrackerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LatencyTracker<C: Clock = SystemClock> {
    clock: C,
    precision: u32,
    epoch: f64,
    series: IndexMap<String, Series>,
}

impl LatencyTracker<SystemClock> {
    /// Create a tracker on the system clock with default precision
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a tracker on the system clock
    pub fn with_config(config: TrackerConfig) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl Default for LatencyTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LatencyTracker<C> {
    /// Create a tracker reading time from `clock`
    pub fn with_clock(clock: C, config: TrackerConfig) -> Self {
        let epoch = round_to(clock.now(), config.precision);
        Self {
            clock,
            precision: config.precision,
            epoch,
            series: IndexMap::new(),
        }
    }

    /// Rounded clock reading relative to the epoch
    fn capture(&self) -> f64 {
        round_to(self.clock.now(), self.precision) - self.epoch
    }

    /// Mark the start of the section named `label`
    ///
    /// The series is created on first use. Starting a label that already has a
    /// pending start stacks a second pending start; the next `stop` pairs with
    /// the most recent one.
    pub fn start(&mut self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(TrackerError::EmptyLabel);
        }

        let start_time = self.capture();
        let index = match self.series.get_index_of(label) {
            Some(index) => index,
            None => {
                tracing::debug!(label, "registering new series");
                self.series
                    .insert_full(label.to_string(), Series::new(label))
                    .0
            }
        };
        self.series[index].push_start(start_time);

        tracing::trace!(label, start_time, "start");
        Ok(())
    }

    /// Mark the end of the section named `label`
    ///
    /// Fails with `UnknownLabel` when the label was never started or has no
    /// pending start; no series is modified in that case.
    pub fn stop(&mut self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(TrackerError::EmptyLabel);
        }

        let end_time = self.capture();
        let series = self
            .series
            .get_mut(label)
            .ok_or_else(|| TrackerError::UnknownLabel(label.to_string()))?;
        let latency = series
            .push_stop(end_time)
            .ok_or_else(|| TrackerError::UnknownLabel(label.to_string()))?;

        tracing::trace!(label, end_time, latency, "stop");
        Ok(())
    }

    /// Time `f` under `label`
    pub fn measure<F, R>(&mut self, label: &str, f: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        self.start(label)?;
        let result = f();
        self.stop(label)?;
        Ok(result)
    }

    /// Summary statistics for `label`
    pub fn statistics(&self, label: &str, display_precision: u32) -> Result<LatencySummary> {
        let series = self
            .series(label)
            .ok_or_else(|| TrackerError::UnknownLabel(label.to_string()))?;
        LatencySummary::from_series(series, display_precision)
    }

    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.get(label)
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// `(label, series)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(label, series)| (label.as_str(), series))
    }

    /// Rounded clock reading at construction
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
