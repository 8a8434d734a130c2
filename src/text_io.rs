//! Plain-text I/O: newline-delimited integer input and the textual report
//!
//! The report layout matches the one the original command-line tool wrote,
//! so existing consumers of those files keep working.

use crate::data_source::{DatasetLoader, ReportFormat, ResultSink};
use crate::dataset::Dataset;
use crate::errors::{Result, StatsError};
use crate::statistics::{AggregateResult, ResultTable, Statistic};
use async_trait::async_trait;
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Loads a dataset from a text file holding one integer per line
#[derive(Debug, Clone)]
pub struct TextFileLoader {
    pub path: PathBuf,
}

impl TextFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetLoader for TextFileLoader {
    async fn load_dataset(&self) -> Result<Dataset> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StatsError::InputUnavailable {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read input file");

        let contents = std::str::from_utf8(&bytes).map_err(|e| {
            StatsError::malformed(format!(
                "invalid UTF-8 at byte offset {}",
                e.valid_up_to()
            ))
        })?;

        Dataset::from_values(parse_integers(contents)?)
    }
}

/// Parse newline-delimited integers, ignoring blank lines
///
/// # Errors
///
/// Returns [`StatsError::MalformedInput`] naming the first offending line
/// (1-based) if any non-blank line is not a valid `i32`.
pub fn parse_integers(contents: &str) -> Result<Vec<i32>> {
    let lines: Vec<(usize, &str)> = contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let parsed: Vec<std::result::Result<i32, usize>> = lines
        .par_iter()
        .map(|&(number, line)| line.parse::<i32>().map_err(|_| number))
        .collect();

    parsed
        .into_iter()
        .zip(&lines)
        .map(|(value, &(_, line))| {
            value.map_err(|number| {
                StatsError::malformed(format!("line {number}: '{line}' is not an integer"))
            })
        })
        .collect()
}

/// Render the full textual report
#[must_use]
pub fn format_report(table: &ResultTable, aggregate: &AggregateResult) -> String {
    let mut out = String::from("From Main Program Thread:\n");

    for (index, result) in table.rows().enumerate() {
        let _ = write!(out, "Worker Child Pthread Number = {index}");
        for statistic in Statistic::ALL {
            let _ = write!(
                out,
                " : \t {} = {}",
                statistic.label(),
                fixed3(result.get(statistic))
            );
        }
        out.push('\n');
    }

    let minimum_lines = [
        ("Min of the Root of the Sum of Squares", Statistic::RootSumSquares),
        ("Min of the Geometric Averages", Statistic::GeometricAverage),
        ("Min of the Arithmetic Averages", Statistic::ArithmeticAverage),
    ];
    for (label, statistic) in minimum_lines {
        let _ = write!(
            out,
            "\nMain program thread:\t{label} =\t{}",
            fixed3(aggregate.get(statistic))
        );
    }

    out.push_str("\nMain program thread: Terminating. \n");
    out
}

/// Three decimals, with C's `NAN` / `INF` / `-INF` spelling for non-finite values
fn fixed3(value: f64) -> String {
    if value.is_nan() {
        "NAN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{value:.3}")
    }
}

/// Write `contents` to `path` so that readers only ever see the complete file
///
/// The data goes to a sibling temporary file first, which is then renamed
/// over the target. On failure the temporary file is removed.
pub(crate) async fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let staging = path.with_file_name(format!(".{file_name}.partial"));

    let written = async {
        let mut file = tokio::fs::File::create(&staging).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&staging, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    Ok(())
}

/// Writes the textual report to a file
#[derive(Debug, Clone)]
pub struct TextReportSink {
    pub path: PathBuf,
}

impl TextReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResultSink for TextReportSink {
    async fn emit(&self, table: &ResultTable, aggregate: &AggregateResult) -> Result<()> {
        let report = format_report(table, aggregate);
        write_atomically(&self.path, report.as_bytes()).await?;
        info!(path = %self.path.display(), "text report written");
        Ok(())
    }
}

/// Prints the report to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink {
    pub format: ReportFormat,
}

#[async_trait]
impl ResultSink for StdoutSink {
    async fn emit(&self, table: &ResultTable, aggregate: &AggregateResult) -> Result<()> {
        let report = self.format.render(table, aggregate)?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(report.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
