//! Partition worker: the second tier of the fan-out
//!
//! A worker owns a read-only view of one partition and runs the three
//! statistic tasks on it concurrently. It only returns once all three have
//! finished, and fails as a whole if any of them fails.

use super::operations::Statistic;
use crate::dataset::Partition;
use crate::errors::{Result, StatsError};
use ndarray::ArrayView1;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Results of the three statistics for one partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionResult {
    pub root_sum_squares: f64,
    pub geometric_average: f64,
    pub arithmetic_average: f64,
}

impl PartitionResult {
    /// Value of a single statistic
    #[must_use]
    pub const fn get(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::RootSumSquares => self.root_sum_squares,
            Statistic::GeometricAverage => self.geometric_average,
            Statistic::ArithmeticAverage => self.arithmetic_average,
        }
    }

    /// Values in result-table column order
    #[must_use]
    pub const fn to_array(&self) -> [f64; 3] {
        [
            self.root_sum_squares,
            self.geometric_average,
            self.arithmetic_average,
        ]
    }
}

/// Observation point invoked at the start of every statistic task
///
/// Hooks run on pool threads concurrently, so implementations must be
/// thread-safe. A hook that panics makes its task fail.
pub trait TaskHook: Send + Sync {
    fn before_reduce(&self, partition: usize, statistic: Statistic);
}

/// Hook that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl TaskHook for NoopHook {
    fn before_reduce(&self, _partition: usize, _statistic: Statistic) {}
}

/// Compute all three statistics for `partition` concurrently
///
/// Must be called from inside a rayon pool for the tasks to run in parallel;
/// outside one they run on the global pool.
///
/// # Errors
///
/// Returns [`StatsError::TaskFailed`] if any statistic task dies. The other
/// tasks are still joined before returning.
pub fn run_partition(
    partition: &Partition,
    values: ArrayView1<'_, i32>,
    hook: &dyn TaskHook,
) -> Result<PartitionResult> {
    let task = |statistic: Statistic| run_task(partition.index, statistic, values, hook);

    let (root_sum_squares, (geometric_average, arithmetic_average)) = rayon::join(
        || task(Statistic::RootSumSquares),
        || {
            rayon::join(
                || task(Statistic::GeometricAverage),
                || task(Statistic::ArithmeticAverage),
            )
        },
    );

    let result = PartitionResult {
        root_sum_squares: root_sum_squares?,
        geometric_average: geometric_average?,
        arithmetic_average: arithmetic_average?,
    };

    debug!(
        partition = partition.index,
        root_sum_squares = result.root_sum_squares,
        geometric_average = result.geometric_average,
        arithmetic_average = result.arithmetic_average,
        "partition complete"
    );

    Ok(result)
}

fn run_task(
    partition: usize,
    statistic: Statistic,
    values: ArrayView1<'_, i32>,
    hook: &dyn TaskHook,
) -> Result<f64> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        hook.before_reduce(partition, statistic);
        statistic.compute(values)
    }))
    .map_err(|payload| StatsError::TaskFailed {
        partition,
        statistic,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
