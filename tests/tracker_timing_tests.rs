//! Timing tests against the system clock
//!
//! Sleep-based measurements tolerate scheduler jitter of about 20ms.

use std::thread;
use std::time::Duration;

use tmark::{demo, LatencyTracker, TrackerConfig, TrackerError};

const TOLERANCE: f64 = 0.02;

#[test]
fn test_two_sleeps_statistics() {
    let mut tracker = LatencyTracker::with_config(TrackerConfig { precision: 5 });

    tracker.start("op").unwrap();
    thread::sleep(Duration::from_millis(100));
    tracker.stop("op").unwrap();

    tracker.start("op").unwrap();
    thread::sleep(Duration::from_millis(120));
    tracker.stop("op").unwrap();

    let summary = tracker.statistics("op", 4).unwrap();
    assert!((summary.min - 0.10).abs() < TOLERANCE, "min = {}", summary.min);
    assert!((summary.max - 0.12).abs() < TOLERANCE, "max = {}", summary.max);
    assert!((summary.mean - 0.11).abs() < TOLERANCE, "mean = {}", summary.mean);
    assert_eq!(summary.count, 2);
}

#[test]
fn test_latency_equals_end_minus_start() {
    let mut tracker = LatencyTracker::new();
    for _ in 0..5 {
        tracker.start("op").unwrap();
        thread::sleep(Duration::from_millis(2));
        tracker.stop("op").unwrap();
    }

    let series = tracker.series("op").unwrap();
    for i in 0..series.len() {
        assert_eq!(
            series.latencies()[i],
            series.end_times()[i] - series.start_times()[i]
        );
        assert_eq!(series.timestamps()[i], series.end_times()[i]);
    }
}

#[test]
fn test_nested_label_spans() {
    let mut tracker = LatencyTracker::new();

    tracker.start("outer").unwrap();
    thread::sleep(Duration::from_millis(5));
    tracker.start("inner").unwrap();
    thread::sleep(Duration::from_millis(10));
    tracker.stop("inner").unwrap();
    thread::sleep(Duration::from_millis(5));
    tracker.stop("outer").unwrap();

    let outer = tracker.series("outer").unwrap();
    let inner = tracker.series("inner").unwrap();
    assert_eq!(outer.len(), 1);
    assert_eq!(inner.len(), 1);
    assert!(outer.latencies()[0] > inner.latencies()[0]);
}

#[test]
fn test_timestamps_non_decreasing() {
    let mut tracker = LatencyTracker::new();
    for _ in 0..20 {
        tracker.start("op").unwrap();
        tracker.stop("op").unwrap();
    }
    let timestamps = tracker.series("op").unwrap().timestamps();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_demo_twelve_iterations() {
    let mut tracker = LatencyTracker::new();
    demo::run(&mut tracker, 12, 0.01).unwrap();

    let labels: Vec<_> = tracker.labels().collect();
    assert_eq!(labels, vec!["operation_1", "operation_2", "operation_3"]);

    for (label, series) in tracker.iter() {
        assert_eq!(series.start_times().len(), 12);
        assert_eq!(series.end_times().len(), 12);
        assert_eq!(series.latencies().len(), 12);
        assert_eq!(series.timestamps().len(), 12);
        assert!(
            series.timestamps().windows(2).all(|w| w[0] < w[1]),
            "{} timestamps not strictly increasing",
            label
        );
    }
}

#[test]
fn test_stop_ghost_on_fresh_tracker() {
    let mut tracker = LatencyTracker::new();
    assert!(matches!(
        tracker.stop("ghost"),
        Err(TrackerError::UnknownLabel(ref label)) if label == "ghost"
    ));
}

#[test]
fn test_statistics_without_completed_pairs() {
    let mut tracker = LatencyTracker::new();
    tracker.start("open").unwrap();
    assert!(matches!(
        tracker.statistics("open", 4),
        Err(TrackerError::EmptySeries(_))
    ));
}
