//! Plot data handed to an external charting collaborator
//!
//! The tracker does not draw. It produces a [`PlotRequest`] (one
//! `(timestamp, latency)` series per label plus an optional summary) and passes
//! it to a [`PlotSink`]. `JsonPlotSink` serializes the request for tools that
//! render charts from JSON.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::ReportOptions;
use crate::error::Result;
use crate::export::ImportedTable;
use crate::report::{tables_report, tracker_report};
use crate::tracker::LatencyTracker;

/// One point on the latency timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub timestamp: f64,
    pub latency: f64,
}

/// A legend entry and its points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<PlotPoint>,
}

/// Everything a chart needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl PlotRequest {
    fn with_series(series: Vec<PlotSeries>, summary: Option<String>) -> Self {
        Self {
            title: "Latencies".to_string(),
            x_label: "Time [s]".to_string(),
            y_label: "Latency [s]".to_string(),
            series,
            summary,
        }
    }

    /// Build from a live tracker, one series per label in first-seen order
    pub fn from_tracker<C: Clock>(tracker: &LatencyTracker<C>, options: &ReportOptions) -> Result<Self> {
        let series = tracker
            .iter()
            .map(|(label, s)| PlotSeries {
                label: label.to_string(),
                points: s
                    .timestamps()
                    .iter()
                    .zip(s.latencies())
                    .map(|(&timestamp, &latency)| PlotPoint { timestamp, latency })
                    .collect(),
            })
            .collect();

        let summary = if options.include_statistics {
            Some(tracker_report(tracker, options.display_precision)?)
        } else {
            None
        };
        Ok(Self::with_series(series, summary))
    }

    /// Build from imported tables, in the order given
    pub fn from_tables(tables: &[ImportedTable], options: &ReportOptions) -> Result<Self> {
        let series = tables
            .iter()
            .map(|table| PlotSeries {
                label: table.name.clone(),
                points: table
                    .points()
                    .map(|(timestamp, latency)| PlotPoint { timestamp, latency })
                    .collect(),
            })
            .collect();

        let summary = if options.include_statistics {
            Some(tables_report(tables, options.display_precision)?)
        } else {
            None
        };
        Ok(Self::with_series(series, summary))
    }
}

/// Consumer of plot requests
pub trait PlotSink {
    fn render(&mut self, request: &PlotRequest) -> Result<()>;
}

/// Writes each request as pretty-printed JSON followed by a newline
#[derive(Debug)]
pub struct JsonPlotSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonPlotSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlotSink for JsonPlotSink<W> {
    fn render(&mut self, request: &PlotRequest) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, request)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::TrackerConfig;

    fn tracker() -> LatencyTracker<ManualClock> {
        let clock = ManualClock::new(0.0);
        let mut tracker = LatencyTracker::with_clock(clock.clone(), TrackerConfig::default());
        tracker.start("op").unwrap();
        clock.advance(0.5);
        tracker.stop("op").unwrap();
        tracker.start("op").unwrap();
        clock.advance(0.25);
        tracker.stop("op").unwrap();
        tracker
    }

    #[test]
    fn test_from_tracker_points() {
        let request = PlotRequest::from_tracker(&tracker(), &ReportOptions::default()).unwrap();
        assert_eq!(request.title, "Latencies");
        assert_eq!(request.series.len(), 1);
        assert_eq!(
            request.series[0].points,
            vec![
                PlotPoint {
                    timestamp: 0.5,
                    latency: 0.5
                },
                PlotPoint {
                    timestamp: 0.75,
                    latency: 0.25
                },
            ]
        );
        assert!(request.summary.is_none());
    }

    #[test]
    fn test_from_tracker_with_statistics() {
        let options = ReportOptions {
            include_statistics: true,
            ..ReportOptions::default()
        };
        let request = PlotRequest::from_tracker(&tracker(), &options).unwrap();
        assert_eq!(
            request.summary.as_deref(),
            Some("op: mean = 0.375, median = 0.375, max = 0.5, min = 0.25")
        );
    }

    #[test]
    fn test_from_tables() {
        let table = ImportedTable {
            name: "op".to_string(),
            start_times: None,
            end_times: None,
            latencies: vec![0.5],
            timestamps: vec![3.0],
        };
        let request = PlotRequest::from_tables(&[table], &ReportOptions::default()).unwrap();
        assert_eq!(request.series[0].label, "op");
        assert_eq!(request.series[0].points[0].timestamp, 3.0);
    }

    #[test]
    fn test_json_sink_output() {
        let request = PlotRequest::from_tracker(&tracker(), &ReportOptions::default()).unwrap();
        let mut sink = JsonPlotSink::new(Vec::new());
        sink.render(&request).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.ends_with('\n'));
        let parsed: PlotRequest = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, request);
        assert!(!output.contains("summary"));
    }
}
