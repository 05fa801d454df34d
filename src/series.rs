//! Per-label latency series
//!
//! A `Series` holds the recorded start times, end times, latencies and timeline
//! positions for one label. Starts that have not been stopped yet live on a
//! per-series stack; `stop` consumes the most recent one.

use serde::Serialize;

/// One completed start/stop pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub start_time: f64,
    pub end_time: f64,
    pub latency: f64,
    /// Timeline position (when the measurement completed)
    pub timestamp: f64,
}

/// Recorded time series for one label
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    /// Every start, in call order (including unmatched ones)
    start_times: Vec<f64>,
    end_times: Vec<f64>,
    latencies: Vec<f64>,
    timestamps: Vec<f64>,
    /// For each completed measurement, the index into `start_times` it consumed
    paired_starts: Vec<usize>,
    /// Indices into `start_times` not yet consumed by a stop
    pending: Vec<usize>,
}

impl Series {
    /// Create an empty series
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start_times: Vec::new(),
            end_times: Vec::new(),
            latencies: Vec::new(),
            timestamps: Vec::new(),
            paired_starts: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Record a pending start
    pub(crate) fn push_start(&mut self, start_time: f64) {
        self.pending.push(self.start_times.len());
        self.start_times.push(start_time);
    }

    /// Complete the most recent pending start at `end_time`
    ///
    /// Returns the latency, or `None` when nothing is pending (the series is
    /// left untouched in that case).
    pub(crate) fn push_stop(&mut self, end_time: f64) -> Option<f64> {
        let start_index = self.pending.pop()?;
        let latency = end_time - self.start_times[start_index];

        self.end_times.push(end_time);
        self.latencies.push(latency);
        self.timestamps.push(end_time);
        self.paired_starts.push(start_index);

        Some(latency)
    }

    /// All start times in call order, including pending ones
    pub fn start_times(&self) -> &[f64] {
        &self.start_times
    }

    pub fn end_times(&self) -> &[f64] {
        &self.end_times
    }

    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }

    /// Timeline positions used as the x-axis for plots and exports
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Number of completed measurements
    pub fn len(&self) -> usize {
        self.latencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }

    /// Number of starts still waiting for a stop
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Completed measurements in recording order
    ///
    /// Each item carries the start that its stop actually consumed, so nested
    /// starts for the same label export consistent rows.
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.paired_starts
            .iter()
            .enumerate()
            .map(move |(i, &start_index)| Measurement {
                start_time: self.start_times[start_index],
                end_time: self.end_times[i],
                latency: self.latencies[i],
                timestamp: self.timestamps[i],
            })
    }
}
