use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tmark::cli::{Cli, Command};
use tmark::config::{Config, ReportOptions, TrackerConfig};
use tmark::plot::{JsonPlotSink, PlotRequest, PlotSink};
use tmark::{demo, export, report, LatencyTracker};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_demo(
    config: &Config,
    iterations: usize,
    time_scale: f64,
    output: &Path,
    json: Option<&Path>,
) -> Result<()> {
    if !time_scale.is_finite() || time_scale < 0.0 {
        anyhow::bail!(
            "Invalid value for --time-scale: {} (must be finite and >= 0)",
            time_scale
        );
    }

    let mut tracker = LatencyTracker::with_config(config.tracker);
    demo::run(&mut tracker, iterations, time_scale)?;

    let written = export::save_csv_dir(&tracker, output)
        .with_context(|| format!("Failed to save tables to {}", output.display()))?;
    eprintln!("Saved {} tables to {}", written.len(), output.display());

    if let Some(path) = json {
        export::save_json(&tracker, path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    }

    let summary = report::tracker_report(&tracker, config.report.display_precision)?;
    println!("Stat:\n{}", summary);
    Ok(())
}

fn run_report(dir: &Path, options: &ReportOptions) -> Result<()> {
    let tables = export::load_csv_dir(dir)
        .with_context(|| format!("Failed to load tables from {}", dir.display()))?;
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    eprintln!("Files read: {:?}", names);

    let summary = report::tables_report(&tables, options.display_precision)?;
    println!("Stat:\n{}", summary);
    Ok(())
}

fn run_plot(dir: &Path, options: &ReportOptions, output: Option<&Path>) -> Result<()> {
    let tables = export::load_csv_dir(dir)
        .with_context(|| format!("Failed to load tables from {}", dir.display()))?;
    let request = PlotRequest::from_tables(&tables, options)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            JsonPlotSink::new(file).render(&request)?;
        }
        None => JsonPlotSink::new(io::stdout().lock()).render(&request)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Demo {
            iterations,
            time_scale,
            output,
            json,
            precision,
            display_precision,
        } => {
            if let Some(precision) = precision {
                config.tracker = TrackerConfig { precision };
            }
            if let Some(digits) = display_precision {
                config.report.display_precision = digits;
            }
            run_demo(&config, iterations, time_scale, &output, json.as_deref())
        }
        Command::Report {
            dir,
            display_precision,
        } => {
            if let Some(digits) = display_precision {
                config.report.display_precision = digits;
            }
            run_report(&dir, &config.report)
        }
        Command::Plot {
            dir,
            statistics,
            output,
            display_precision,
        } => {
            if let Some(digits) = display_precision {
                config.report.display_precision = digits;
            }
            config.report.include_statistics |= statistics;
            run_plot(&dir, &config.report, output.as_deref())
        }
    }
}
