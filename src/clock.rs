//! Clock sources and time quantization
//!
//! The tracker reads wall-clock time as a real number of seconds. `SystemClock`
//! is the production source; `ManualClock` is driven explicitly so tests and
//! benchmarks can produce exact readings.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock readings in seconds
pub trait Clock {
    /// Current reading in seconds
    fn now(&self) -> f64;
}

/// Wall clock backed by `SystemTime` (seconds since the Unix epoch)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default()
    }
}

/// Explicitly driven clock
///
/// Clones share the same reading, so a test can keep one handle while the
/// tracker owns another.
///
/// # Example
/// ```
/// use tmark::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100.0);
/// let handle = clock.clone();
/// handle.advance(0.25);
/// assert_eq!(clock.now(), 100.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Set the reading
    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::SeqCst);
    }

    /// Move the reading forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        let current = f64::from_bits(self.bits.load(Ordering::SeqCst));
        self.set(current + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Round `value` to `digits` decimal places, ties to even
///
/// Matches the quantization applied to captured clock readings: two readings
/// closer than `10^-digits` seconds may collapse to the same value.
pub fn round_to(value: f64, digits: u32) -> f64 {
    // Past 308 digits the factor is infinite and the value passes through
    let factor = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}
