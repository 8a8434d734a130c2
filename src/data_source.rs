//! Boundary traits for the collaborators around the computation
//!
//! The core never touches files or streams itself. A [`DatasetLoader`]
//! hands it a finished [`Dataset`]; a [`ResultSink`] receives the completed
//! result table and aggregate and decides how to serialize them.

use crate::dataset::Dataset;
use crate::errors::Result;
use crate::statistics::{AggregateResult, ResultTable};
use async_trait::async_trait;

/// Source of the input dataset
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Load exactly [`crate::dataset::DATASET_LEN`] integers
    ///
    /// Implementations report `InputUnavailable` when the source cannot be
    /// read and `MalformedInput` when it does not hold the right integers.
    async fn load_dataset(&self) -> Result<Dataset>;
}

/// Destination for a completed computation
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Emit the per-partition table and the aggregate minimums
    ///
    /// Only called after every worker succeeded. Implementations must not
    /// leave partial output behind when they fail.
    async fn emit(&self, table: &ResultTable, aggregate: &AggregateResult) -> Result<()>;
}

/// An already loaded dataset serves as its own in-memory source
#[async_trait]
impl DatasetLoader for Dataset {
    async fn load_dataset(&self) -> Result<Dataset> {
        Ok(self.clone())
    }
}

/// Serialization used by the report sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Labelled text lines, three decimals per value
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    /// Render a completed computation in this format
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::StatsError::JsonError`] if JSON serialization fails.
    pub fn render(self, table: &ResultTable, aggregate: &AggregateResult) -> Result<String> {
        match self {
            Self::Text => Ok(crate::text_io::format_report(table, aggregate)),
            Self::Json => {
                let mut document =
                    serde_json::to_string_pretty(&crate::json_io::report_to_json(table, aggregate))?;
                document.push('\n');
                Ok(document)
            }
        }
    }
}
