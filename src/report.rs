//! Human-readable session summary
//!
//! One line per label: `label: mean = M, median = D, max = X, min = N`.

use crate::clock::Clock;
use crate::error::Result;
use crate::export::ImportedTable;
use crate::stats::LatencySummary;
use crate::tracker::LatencyTracker;

pub fn summary_line(label: &str, summary: &LatencySummary) -> String {
    format!("{}: {}", label, summary)
}

/// Report for `labels`, in the order given
pub fn session_report<C: Clock>(
    tracker: &LatencyTracker<C>,
    labels: &[&str],
    display_precision: u32,
) -> Result<String> {
    let lines = labels
        .iter()
        .map(|label| {
            let summary = tracker.statistics(label, display_precision)?;
            Ok(summary_line(label, &summary))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Report for every label, in first-seen order
pub fn tracker_report<C: Clock>(tracker: &LatencyTracker<C>, display_precision: u32) -> Result<String> {
    let labels: Vec<&str> = tracker.labels().collect();
    session_report(tracker, &labels, display_precision)
}

/// Report for imported tables, in the order given
pub fn tables_report(tables: &[ImportedTable], display_precision: u32) -> Result<String> {
    let lines = tables
        .iter()
        .map(|table| Ok(summary_line(&table.name, &table.summary(display_precision)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::TrackerConfig;
    use crate::error::TrackerError;

    fn tracker() -> LatencyTracker<ManualClock> {
        let clock = ManualClock::new(0.0);
        let mut tracker = LatencyTracker::with_clock(clock.clone(), TrackerConfig::default());
        for (label, latency) in [("first", 0.5), ("second", 0.25), ("first", 1.5)] {
            tracker.start(label).unwrap();
            clock.advance(latency);
            tracker.stop(label).unwrap();
        }
        tracker
    }

    #[test]
    fn test_session_report_lines() {
        let report = session_report(&tracker(), &["second", "first"], 4).unwrap();
        assert_eq!(
            report,
            "second: mean = 0.25, median = 0.25, max = 0.25, min = 0.25\n\
             first: mean = 1.0, median = 1.0, max = 1.5, min = 0.5"
        );
    }

    #[test]
    fn test_tracker_report_uses_first_seen_order() {
        let report = tracker_report(&tracker(), 4).unwrap();
        let labels: Vec<_> = report
            .lines()
            .map(|line| line.split(':').next().unwrap())
            .collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn test_session_report_unknown_label() {
        assert!(matches!(
            session_report(&tracker(), &["first", "ghost"], 4),
            Err(TrackerError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_session_report_pending_only_label() {
        let mut tracker = tracker();
        tracker.start("waiting").unwrap();
        assert!(matches!(
            tracker_report(&tracker, 4),
            Err(TrackerError::EmptySeries(_))
        ));
    }

    #[test]
    fn test_tables_report() {
        let table = ImportedTable {
            name: "data_op.csv".to_string(),
            start_times: None,
            end_times: None,
            latencies: vec![0.1, 0.3],
            timestamps: vec![1.0, 2.0],
        };
        let report = tables_report(&[table], 4).unwrap();
        assert!(report.starts_with("data_op.csv: mean = 0.2"));
        assert!(report.ends_with("max = 0.3, min = 0.1"));
    }

    #[test]
    fn test_empty_report() {
        let tracker = LatencyTracker::with_clock(ManualClock::new(0.0), TrackerConfig::default());
        assert_eq!(tracker_report(&tracker, 4).unwrap(), "");
    }
}
