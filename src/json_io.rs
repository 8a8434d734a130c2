//! JSON report output

use crate::data_source::{ReportFormat, ResultSink};
use crate::dataset::Partition;
use crate::errors::Result;
use crate::statistics::{AggregateResult, ResultTable};
use crate::text_io::write_atomically;
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use tracing::info;

/// Build the JSON document for a completed computation
///
/// Non-finite values have no JSON representation and are written as `null`.
#[must_use]
pub fn report_to_json(table: &ResultTable, aggregate: &AggregateResult) -> JsonValue {
    let partitions: Vec<JsonValue> = Partition::all()
        .zip(table.rows())
        .map(|(partition, result)| {
            json!({
                "index": partition.index,
                "offset": partition.offset,
                "len": partition.len,
                "root_sum_squares": number(result.root_sum_squares),
                "geometric_average": number(result.geometric_average),
                "arithmetic_average": number(result.arithmetic_average),
            })
        })
        .collect();

    json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "partitions": partitions,
        "minimums": {
            "root_sum_squares": number(aggregate.min_root_sum_squares),
            "geometric_average": number(aggregate.min_geometric_average),
            "arithmetic_average": number(aggregate.min_arithmetic_average),
        },
    })
}

fn number(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}

/// Writes the report as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    pub path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResultSink for JsonReportSink {
    async fn emit(&self, table: &ResultTable, aggregate: &AggregateResult) -> Result<()> {
        let document = ReportFormat::Json.render(table, aggregate)?;
        write_atomically(&self.path, document.as_bytes()).await?;
        info!(path = %self.path.display(), "JSON report written");
        Ok(())
    }
}
