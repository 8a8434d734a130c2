//! Defines command-line interface options using `clap` for the partition-stats binary.

use clap::{Parser, ValueEnum};
use partition_stats::ReportFormat;
use std::path::PathBuf;

/// Compute per-partition statistics over a 14000-integer input file
#[derive(Parser, Debug)]
#[command(
    version,
    name = "partition-stats",
    about = "Root of sum of squares, geometric and arithmetic averages over 14 partitions"
)]
pub struct Args {
    /// Text file with one integer per line (exactly 14000 integers)
    pub input: PathBuf,

    /// Path to write the report to. If not set, prints to terminal.
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long, value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn parse_threads(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Thread count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid thread count '{s}'")),
    }
}
