//! tmark - lightweight latency tracker for labelled code sections
//!
//! Callers mark the start and end of named sections; the tracker records each
//! section's latency together with its position on the session timeline,
//! summarizes the series (mean/median/max/min) and exports them as tables or
//! plot data.
//!
//! ```
//! use tmark::{LatencyTracker, TrackerConfig};
//!
//! let mut tracker = LatencyTracker::with_config(TrackerConfig::default());
//! tracker.start("parse")?;
//! // ... work ...
//! tracker.stop("parse")?;
//!
//! let summary = tracker.statistics("parse", 4)?;
//! println!("parse: {}", summary);
//! # Ok::<(), tmark::TrackerError>(())
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod demo;
pub mod error;
pub mod export;
pub mod plot;
pub mod report;
pub mod series;
pub mod shared;
pub mod stats;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ReportOptions, TrackerConfig};
pub use error::{Result, TrackerError};
pub use series::{Measurement, Series};
pub use shared::SharedTracker;
pub use stats::LatencySummary;
pub use tracker::LatencyTracker;
