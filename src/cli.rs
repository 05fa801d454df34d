//! CLI argument parsing for tmark

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tmark")]
#[command(version)]
#[command(about = "Lightweight latency tracker for labelled code sections", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// TOML configuration file ([tracker] and [report] tables)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the demonstration workload, save its tables and print statistics
    Demo {
        /// Number of workload iterations
        #[arg(short = 'n', long = "iterations", default_value = "12")]
        iterations: usize,

        /// Multiplier applied to every simulated sleep
        #[arg(long = "time-scale", value_name = "FACTOR", default_value = "1.0")]
        time_scale: f64,

        /// Directory receiving one CSV file per label
        #[arg(short, long, value_name = "DIR", default_value = "./csv/")]
        output: PathBuf,

        /// Also write a JSON snapshot of the whole session
        #[arg(long = "json", value_name = "FILE")]
        json: Option<PathBuf>,

        /// Decimal digits kept for captured times
        #[arg(long = "precision", value_name = "DIGITS")]
        precision: Option<u32>,

        /// Decimal digits shown in statistics
        #[arg(long = "display-precision", value_name = "DIGITS")]
        display_precision: Option<u32>,
    },

    /// Print statistics for every CSV table in a directory
    Report {
        /// Directory containing exported CSV tables
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Decimal digits shown in statistics
        #[arg(long = "display-precision", value_name = "DIGITS")]
        display_precision: Option<u32>,
    },

    /// Emit plot data (JSON) for every CSV table in a directory
    Plot {
        /// Directory containing exported CSV tables
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Attach the statistics summary to the plot data
        #[arg(short = 's', long = "statistics")]
        statistics: bool,

        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Decimal digits shown in statistics
        #[arg(long = "display-precision", value_name = "DIGITS")]
        display_precision: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_demo_defaults() {
        let cli = Cli::parse_from(["tmark", "demo"]);
        match cli.command {
            Command::Demo {
                iterations,
                time_scale,
                output,
                json,
                precision,
                display_precision,
            } => {
                assert_eq!(iterations, 12);
                assert_eq!(time_scale, 1.0);
                assert_eq!(output, PathBuf::from("./csv/"));
                assert!(json.is_none());
                assert!(precision.is_none());
                assert!(display_precision.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.debug);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_demo_overrides() {
        let cli = Cli::parse_from([
            "tmark",
            "demo",
            "-n",
            "3",
            "--time-scale",
            "0.01",
            "--precision",
            "6",
            "--json",
            "out.json",
        ]);
        match cli.command {
            Command::Demo {
                iterations,
                time_scale,
                precision,
                json,
                ..
            } => {
                assert_eq!(iterations, 3);
                assert_eq!(time_scale, 0.01);
                assert_eq!(precision, Some(6));
                assert_eq!(json, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_report_requires_dir() {
        assert!(Cli::try_parse_from(["tmark", "report"]).is_err());
        let cli = Cli::parse_from(["tmark", "report", "./csv/", "--display-precision", "2"]);
        match cli.command {
            Command::Report {
                dir,
                display_precision,
            } => {
                assert_eq!(dir, PathBuf::from("./csv/"));
                assert_eq!(display_precision, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_plot_flags() {
        let cli = Cli::parse_from(["tmark", "--debug", "plot", "data", "-s"]);
        assert!(cli.debug);
        match cli.command {
            Command::Plot {
                statistics, output, ..
            } => {
                assert!(statistics);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_config_after_subcommand() {
        let cli = Cli::parse_from(["tmark", "report", "dir", "--config", "tmark.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("tmark.toml")));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["tmark"]).is_err());
    }
}
