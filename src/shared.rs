//! Thread-safe tracker handle
//!
//! `LatencyTracker` assumes one flow of control. When several threads time
//! sections into the same session, share it through `SharedTracker`: every
//! operation takes the lock for the duration of one append or read.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::stats::LatencySummary;
use crate::tracker::LatencyTracker;

/// Cloneable handle to a mutex-guarded tracker
#[derive(Debug)]
pub struct SharedTracker<C: Clock = SystemClock> {
    inner: Arc<Mutex<LatencyTracker<C>>>,
}

impl<C: Clock> Clone for SharedTracker<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedTracker<SystemClock> {
    pub fn new(config: TrackerConfig) -> Self {
        Self::from_tracker(LatencyTracker::with_config(config))
    }
}

impl<C: Clock> SharedTracker<C> {
    pub fn from_tracker(tracker: LatencyTracker<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LatencyTracker<C>> {
        // A panic cannot leave a series half-appended, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start(&self, label: &str) -> Result<()> {
        self.lock().start(label)
    }

    pub fn stop(&self, label: &str) -> Result<()> {
        self.lock().stop(label)
    }

    pub fn statistics(&self, label: &str, display_precision: u32) -> Result<LatencySummary> {
        self.lock().statistics(label, display_precision)
    }

    /// Run `f` with exclusive access to the tracker
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LatencyTracker<C>) -> R,
    {
        f(&mut *self.lock())
    }
}

impl<C: Clock + Clone> SharedTracker<C> {
    /// Copy of the current tracker state
    pub fn snapshot(&self) -> LatencyTracker<C> {
        self.lock().clone()
    }
}
