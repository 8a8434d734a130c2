//! Coordinator: the first tier of the fan-out
//!
//! The coordinator owns the result table. It hands every partition worker a
//! read-only view of its partition plus exclusive access to its own table
//! row, so the workers never share anything mutable and need no locks. Row
//! `i` therefore always holds partition `i`, whatever order workers finish in.

use super::aggregate::{aggregate, write_row, AggregateResult, ResultTable};
use super::operations::Statistic;
use super::worker::{run_partition, NoopHook, TaskHook};
use crate::data_source::{DatasetLoader, ResultSink};
use crate::dataset::{Dataset, Partition};
use crate::errors::{Result, StatsError};
use crate::parallel::ParallelConfig;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Completed computation: the per-partition table and its minimums
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub table: ResultTable,
    pub aggregate: AggregateResult,
}

/// Spawns one worker per partition and joins them
#[derive(Clone)]
pub struct Coordinator {
    config: ParallelConfig,
    hook: Arc<dyn TaskHook>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(ParallelConfig::default())
    }
}

impl Coordinator {
    #[must_use]
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            hook: Arc::new(NoopHook),
        }
    }

    /// Install a hook that runs at the start of every statistic task
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn TaskHook>) -> Self {
        self.hook = hook;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Run every partition worker concurrently and collect their results
    ///
    /// Returns only after all workers have joined. If any worker fails the
    /// whole computation fails and no table is returned.
    ///
    /// # Errors
    ///
    /// - [`StatsError::AllocationFailure`] if the worker pool cannot be built
    /// - [`StatsError::TaskFailed`] if any statistic task fails
    pub fn compute(&self, dataset: &Dataset) -> Result<ResultTable> {
        let pool = self.config.build_pool()?;
        let hook = self.hook.as_ref();
        let partitions: Vec<Partition> = Partition::all().collect();
        let mut table = ResultTable::empty();

        info!(
            partitions = partitions.len(),
            threads = pool.current_num_threads(),
            "spawning partition workers"
        );
        let started = Instant::now();

        pool.install(|| {
            table
                .rows_mut()
                .into_par_iter()
                .zip(partitions.into_par_iter())
                .try_for_each(|(mut row, partition)| {
                    let result = run_partition(&partition, dataset.partition(&partition), hook)?;
                    write_row(&mut row, &result);
                    Ok::<(), StatsError>(())
                })
        })?;

        debug!(elapsed = ?started.elapsed(), "all partition workers joined");
        warn_non_finite(&table);

        Ok(table)
    }

    /// Compute the table and its minimums for an already loaded dataset
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute`].
    pub fn run(&self, dataset: &Dataset) -> Result<Report> {
        let table = self.compute(dataset)?;
        let aggregate = aggregate(&table);
        info!(
            min_root_sum_squares = aggregate.min_root_sum_squares,
            min_geometric_average = aggregate.min_geometric_average,
            min_arithmetic_average = aggregate.min_arithmetic_average,
            "aggregation complete"
        );
        Ok(Report { table, aggregate })
    }

    /// Load, compute, aggregate and emit
    ///
    /// Loader errors abort before any worker is spawned, and the sink is
    /// only reached once the computation fully succeeded. The computation
    /// runs on tokio's blocking pool so it never stalls the async runtime.
    ///
    /// # Errors
    ///
    /// Any error from the loader, the computation or the sink.
    pub async fn run_with<L, S>(&self, loader: &L, sink: &S) -> Result<Report>
    where
        L: DatasetLoader + ?Sized,
        S: ResultSink + ?Sized,
    {
        let dataset = loader.load_dataset().await?;
        info!(elements = dataset.len(), "dataset loaded");

        let coordinator = self.clone();
        let report = tokio::task::spawn_blocking(move || coordinator.run(&dataset))
            .await
            .map_err(|e| StatsError::Aborted {
                message: format!("computation task did not complete: {e}"),
            })??;

        sink.emit(&report.table, &report.aggregate).await?;
        info!("results emitted");

        Ok(report)
    }
}

fn warn_non_finite(table: &ResultTable) {
    for (index, result) in table.rows().enumerate() {
        for statistic in Statistic::ALL {
            let value = result.get(statistic);
            if !value.is_finite() {
                warn!(
                    partition = index,
                    statistic = statistic.as_str(),
                    value,
                    "non-finite statistic"
                );
            }
        }
    }
}
