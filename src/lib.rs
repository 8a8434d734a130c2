//! partition_stats: two-tier parallel statistics over a partitioned dataset
//!
//! A fixed dataset of 14 000 integers is split into 14 partitions of 1000
//! elements. A coordinator fans out one worker per partition; each worker
//! fans out again into three tasks computing the root of the sum of squares,
//! the geometric average and the arithmetic average of its partition. The
//! per-partition results are then reduced to the minimum of each statistic.
//!
//! ## Key Features
//!
//! - **Parallel Processing**: both tiers run on a Rayon pool
//! - **Lock-free Results**: workers write disjoint rows of the result table
//! - **Barrier Semantics**: any failing task fails the whole run, no partial output
//! - **Pluggable I/O**: async loader and sink traits with text and JSON implementations
//!
//! ## Module Organization
//!
//! - [`dataset`]: the fixed-size dataset and its partitions
//! - [`statistics`]: statistic reducers, partition workers, coordinator, aggregation
//! - [`data_source`]: loader and sink traits
//! - [`text_io`]: newline-delimited input and the text report
//! - [`json_io`]: JSON report
//! - [`parallel`]: thread pool configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use partition_stats::prelude::*;
//!
//! # async fn demo() -> partition_stats::errors::Result<()> {
//! let loader = TextFileLoader::new("input.txt");
//! let sink = TextReportSink::new("output.txt");
//!
//! let report = Coordinator::new(ParallelConfig::default())
//!     .run_with(&loader, &sink)
//!     .await?;
//! println!("{}", report.aggregate.min_arithmetic_average);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod data_source;
pub mod dataset;
pub mod errors;
pub mod json_io;
pub mod parallel;
pub mod statistics;
pub mod text_io;

// Direct re-exports for the public API
pub use data_source::*;
pub use dataset::*;
pub use errors::*;
pub use parallel::*;
pub use statistics::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::data_source::{DatasetLoader, ReportFormat, ResultSink};
    pub use crate::dataset::{Dataset, Partition, DATASET_LEN, PARTITION_COUNT, PARTITION_LEN};
    pub use crate::errors::{Result, StatsError};
    pub use crate::json_io::JsonReportSink;
    pub use crate::parallel::ParallelConfig;
    pub use crate::statistics::{
        AggregateResult, Coordinator, PartitionResult, Report, ResultTable, Statistic,
    };
    pub use crate::text_io::{StdoutSink, TextFileLoader, TextReportSink};
}
