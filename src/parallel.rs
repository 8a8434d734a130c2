//! Parallel processing configuration and management
//!
//! This module provides abstractions for configuring the Rayon thread pools
//! that run partition workers and their statistic tasks.

use crate::errors::{Result, StatsError};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    #[must_use]
    pub const fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Create a configuration that uses all available CPU cores
    #[must_use]
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    /// Create a configuration that uses a specific number of threads
    #[must_use]
    pub const fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Build a dedicated pool for one computation
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::AllocationFailure`] if the pool threads cannot be spawned.
    pub fn build_pool(&self) -> Result<ThreadPool> {
        let builder = ThreadPoolBuilder::new()
            .thread_name(|index| format!("partition-worker-{index}"));
        let builder = match self.num_threads {
            Some(num_threads) => builder.num_threads(num_threads),
            None => builder,
        };

        let pool = builder.build().map_err(|e| StatsError::AllocationFailure {
            message: format!("failed to build worker pool: {e}"),
        })?;
        debug!(threads = pool.current_num_threads(), "worker pool ready");
        Ok(pool)
    }
}

/// Get information about the current parallel configuration
#[must_use]
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Log parallel processing information
    pub fn log(&self) {
        debug!(
            current_threads = self.current_threads,
            available_cores = self.available_cores,
            available_parallelism = self.available_parallelism,
            "parallel processing environment"
        );
    }
}
