//! The fixed-size input dataset and its partitioning
//!
//! A [`Dataset`] always holds exactly [`DATASET_LEN`] integers. It is split
//! into [`PARTITION_COUNT`] contiguous, disjoint [`Partition`]s of
//! [`PARTITION_LEN`] elements each, which together cover the whole dataset.

use crate::errors::{Result, StatsError};
use ndarray::{s, Array1, ArrayView1};
use std::ops::Range;

/// Number of integers in a dataset
pub const DATASET_LEN: usize = 14_000;

/// Number of partition workers
pub const PARTITION_COUNT: usize = 14;

/// Number of integers handled by each partition worker
pub const PARTITION_LEN: usize = DATASET_LEN / PARTITION_COUNT;

/// Immutable, ordered sequence of exactly [`DATASET_LEN`] integers
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Array1<i32>,
}

impl Dataset {
    /// Wrap loaded values, rejecting anything that is not exactly [`DATASET_LEN`] long
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MalformedInput`] when the length is wrong.
    pub fn from_values(values: Vec<i32>) -> Result<Self> {
        if values.len() != DATASET_LEN {
            return Err(StatsError::malformed(format!(
                "expected {} integers, found {}",
                DATASET_LEN,
                values.len()
            )));
        }

        Ok(Self {
            values: Array1::from(values),
        })
    }

    /// Number of elements (always [`DATASET_LEN`])
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed dataset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only view over the whole dataset
    #[must_use]
    pub fn view(&self) -> ArrayView1<'_, i32> {
        self.values.view()
    }

    /// Read-only view over one partition's elements
    #[must_use]
    pub fn partition(&self, partition: &Partition) -> ArrayView1<'_, i32> {
        let range = partition.range();
        self.values.slice(s![range.start..range.end])
    }
}

/// View descriptor for one contiguous segment of a [`Dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    pub index: usize,
    pub offset: usize,
    pub len: usize,
}

impl Partition {
    /// Partition number `index`, or `None` when it is out of range
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < PARTITION_COUNT {
            Some(Self {
                index,
                offset: index * PARTITION_LEN,
                len: PARTITION_LEN,
            })
        } else {
            None
        }
    }

    /// All partitions in index order
    pub fn all() -> impl ExactSizeIterator<Item = Partition> {
        (0..PARTITION_COUNT).map(|index| Partition {
            index,
            offset: index * PARTITION_LEN,
            len: PARTITION_LEN,
        })
    }

    /// Element index range covered by this partition
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}
