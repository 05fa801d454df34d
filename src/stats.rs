//! Descriptive statistics over a latency series
//!
//! All reductions run on the recorded `f64` values; the only loss is the
//! final rounding to the display precision. The median interpolates between
//! the two middle values of an even-length series.

use std::fmt;

use crate::clock::round_to;
use crate::error::{Result, TrackerError};
use crate::series::Series;

/// Summary of one series' completed latencies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    /// Number of completed measurements summarized
    pub count: usize,
}

impl LatencySummary {
    /// Summarize `latencies`, rounding each value to `display_precision` digits
    ///
    /// `label` only names the series in the `EmptySeries` error.
    pub fn from_latencies(label: &str, latencies: &[f64], display_precision: u32) -> Result<Self> {
        if latencies.is_empty() {
            return Err(TrackerError::EmptySeries(label.to_string()));
        }

        let mean = latencies.iter().sum::<f64>() / latencies.len() as f64;
        let max = latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = latencies.iter().copied().fold(f64::INFINITY, f64::min);

        let mut sorted = latencies.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = median(&sorted);

        let r = display_precision;
        Ok(Self {
            mean: round_to(mean, r),
            median: round_to(median, r),
            max: round_to(max, r),
            min: round_to(min, r),
            count: latencies.len(),
        })
    }

    /// Summarize a series' completed measurements
    pub fn from_series(series: &Series, display_precision: u32) -> Result<Self> {
        Self::from_latencies(series.label(), series.latencies(), display_precision)
    }
}

/// Whole values keep a trailing `.0`
impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean = {:?}, median = {:?}, max = {:?}, min = {:?}",
            self.mean, self.median, self.max, self.min
        )
    }
}

/// Median of non-empty, ascending `sorted`
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
