//! Statistical computations and the two-tier parallel fan-out
//!
//! # Organization
//!
//! This module is organized into submodules:
//! - [`operations`]: the three pure statistic reductions
//! - [`worker`]: per-partition worker running the three statistics concurrently
//! - [`coordinator`]: fan-out of all partition workers and the end-to-end pipeline
//! - [`aggregate`]: result table and minimum aggregation

pub mod aggregate;
pub mod coordinator;
pub mod operations;
pub mod worker;

// Re-export the main types and functions for convenience
pub use aggregate::{aggregate, AggregateResult, ResultTable};
pub use coordinator::{Coordinator, Report};
pub use operations::{
    arithmetic_average, geometric_average, root_of_sum_of_squares, Statistic, STATISTIC_COUNT,
};
pub use worker::{run_partition, NoopHook, PartitionResult, TaskHook};
