//! Tabular export and import of latency series
//!
//! Each label maps to one table of rows `startTime,endTime,latency,timestamp`,
//! one row per completed measurement in recording order. Tables can be written
//! as a directory of CSV files (`data_<label>.csv`) or as a single JSON
//! snapshot of the whole session.
//!
//! Import locates columns by header name. Only `latency` and `timestamp` are
//! required; the legacy names `starts_times`, `end_times`, `latencies` and `t`
//! are accepted, and any other column (such as a leading index) is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::series::Series;
use crate::stats::LatencySummary;
use crate::tracker::LatencyTracker;

/// Column names in export order
pub const COLUMNS: [&str; 4] = ["startTime", "endTime", "latency", "timestamp"];

const FILE_PREFIX: &str = "data_";
const FILE_EXTENSION: &str = "csv";

/// One exported measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyRow {
    pub start_time: f64,
    pub end_time: f64,
    pub latency: f64,
    pub timestamp: f64,
}

/// Rows of one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyTable {
    pub name: String,
    pub rows: Vec<LatencyRow>,
}

impl LatencyTable {
    /// Export the completed measurements of `series`
    pub fn from_series(series: &Series) -> Self {
        let rows = series
            .measurements()
            .map(|m| LatencyRow {
                start_time: m.start_time,
                end_time: m.end_time,
                latency: m.latency,
                timestamp: m.timestamp,
            })
            .collect();
        Self {
            name: series.label().to_string(),
            rows,
        }
    }

    /// Render as CSV with a header line
    pub fn to_csv(&self) -> String {
        let mut output = COLUMNS.join(",");
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{},{},{},{}\n",
                row.start_time, row.end_time, row.latency, row.timestamp
            ));
        }
        output
    }
}

/// Export every series of `tracker` in first-seen label order
pub fn export_tables<C: Clock>(tracker: &LatencyTracker<C>) -> Vec<LatencyTable> {
    tracker
        .iter()
        .map(|(_, series)| LatencyTable::from_series(series))
        .collect()
}

/// A table reconstructed without the tracker that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTable {
    pub name: String,
    pub start_times: Option<Vec<f64>>,
    pub end_times: Option<Vec<f64>>,
    pub latencies: Vec<f64>,
    pub timestamps: Vec<f64>,
}

impl ImportedTable {
    pub fn len(&self) -> usize {
        self.latencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }

    /// `(timestamp, latency)` pairs in row order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.latencies.iter().copied())
    }

    pub fn summary(&self, display_precision: u32) -> Result<LatencySummary> {
        LatencySummary::from_latencies(&self.name, &self.latencies, display_precision)
    }

    /// Parse CSV text; `origin` names the table in errors
    pub fn from_csv(name: impl Into<String>, origin: &str, content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| TrackerError::malformed(origin, "empty table"))?;
        let headers: Vec<&str> = header.split(',').map(str::trim).collect();

        let start_col = column(&headers, &["startTime", "starts_times"]);
        let end_col = column(&headers, &["endTime", "end_times"]);
        let latency_col = column(&headers, &["latency", "latencies"])
            .ok_or_else(|| TrackerError::malformed(origin, "missing column 'latency'"))?;
        let timestamp_col = column(&headers, &["timestamp", "t"])
            .ok_or_else(|| TrackerError::malformed(origin, "missing column 'timestamp'"))?;

        let mut start_times = start_col.map(|_| Vec::new());
        let mut end_times = end_col.map(|_| Vec::new());
        let mut latencies = Vec::new();
        let mut timestamps = Vec::new();

        for (line_num, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != headers.len() {
                return Err(TrackerError::malformed(
                    origin,
                    format!(
                        "line {}: expected {} fields, got {}",
                        line_num + 1,
                        headers.len(),
                        fields.len()
                    ),
                ));
            }

            let parse = |col: usize| -> Result<f64> {
                fields[col].parse::<f64>().map_err(|_| {
                    TrackerError::malformed(
                        origin,
                        format!(
                            "line {}: non-numeric value '{}' in column '{}'",
                            line_num + 1,
                            fields[col],
                            headers[col]
                        ),
                    )
                })
            };

            latencies.push(parse(latency_col)?);
            timestamps.push(parse(timestamp_col)?);
            if let (Some(col), Some(values)) = (start_col, start_times.as_mut()) {
                values.push(parse(col)?);
            }
            if let (Some(col), Some(values)) = (end_col, end_times.as_mut()) {
                values.push(parse(col)?);
            }
        }

        Ok(Self {
            name: name.into(),
            start_times,
            end_times,
            latencies,
            timestamps,
        })
    }
}

impl From<&LatencyTable> for ImportedTable {
    fn from(table: &LatencyTable) -> Self {
        Self {
            name: table.name.clone(),
            start_times: Some(table.rows.iter().map(|r| r.start_time).collect()),
            end_times: Some(table.rows.iter().map(|r| r.end_time).collect()),
            latencies: table.rows.iter().map(|r| r.latency).collect(),
            timestamps: table.rows.iter().map(|r| r.timestamp).collect(),
        }
    }
}

/// Index of the first header matching any of `names`
fn column(headers: &[&str], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(h))
}

fn table_file_name(label: &str) -> Result<String> {
    if label.contains(|c: char| matches!(c, '/' | '\\' | '\0')) || label == "." || label == ".." {
        return Err(TrackerError::UnsafeTableName(label.to_string()));
    }
    Ok(format!("{}{}.{}", FILE_PREFIX, label, FILE_EXTENSION))
}

/// Write one `data_<label>.csv` per series into `dir`, creating it if needed
///
/// Returns the written paths in label order.
pub fn save_csv_dir<C: Clock>(tracker: &LatencyTracker<C>, dir: &Path) -> Result<Vec<PathBuf>> {
    // Validate every name before touching the filesystem
    let names = tracker
        .labels()
        .map(table_file_name)
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(names.len());
    for (table, name) in export_tables(tracker).iter().zip(names) {
        let path = dir.join(name);
        fs::write(&path, table.to_csv())?;
        tracing::debug!(path = %path.display(), rows = table.rows.len(), "wrote table");
        written.push(path);
    }
    Ok(written)
}

/// Load every `*.csv` file in `dir`, sorted by file name
pub fn load_csv_dir(dir: &Path) -> Result<Vec<ImportedTable>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(FILE_EXTENSION) {
            paths.push(path);
        } else {
            tracing::warn!(path = %path.display(), "skipping non-CSV file");
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let name = stem.strip_prefix(FILE_PREFIX).unwrap_or(stem.as_str()).to_string();
            ImportedTable::from_csv(name, &path.display().to_string(), &content)
        })
        .collect()
}

/// Whole-session JSON snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub epoch: f64,
    pub precision: u32,
    pub tables: Vec<LatencyTable>,
}

impl TrackerSnapshot {
    pub fn from_tracker<C: Clock>(tracker: &LatencyTracker<C>) -> Self {
        Self {
            epoch: tracker.epoch(),
            precision: tracker.precision(),
            tables: export_tables(tracker),
        }
    }

    pub fn imported_tables(&self) -> Vec<ImportedTable> {
        self.tables.iter().map(ImportedTable::from).collect()
    }
}

pub fn save_json<C: Clock>(tracker: &LatencyTracker<C>, path: &Path) -> Result<()> {
    let snapshot = TrackerSnapshot::from_tracker(tracker);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<TrackerSnapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
