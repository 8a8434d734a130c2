//! Result table and the minimum aggregation over it

use super::operations::{Statistic, STATISTIC_COUNT};
use super::worker::PartitionResult;
use crate::dataset::PARTITION_COUNT;
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};

/// Per-partition, per-statistic results
///
/// Rows are partitions in index order; columns follow [`Statistic::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    data: Array2<f64>,
}

impl ResultTable {
    /// Table with every cell set to NaN, ready to be filled row by row
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Array2::from_elem((PARTITION_COUNT, STATISTIC_COUNT), f64::NAN),
        }
    }

    /// Build a table from per-partition results given in index order
    ///
    /// Returns `None` unless exactly [`PARTITION_COUNT`] rows are supplied.
    #[must_use]
    pub fn from_rows(rows: &[PartitionResult]) -> Option<Self> {
        if rows.len() != PARTITION_COUNT {
            return None;
        }

        let mut table = Self::empty();
        for (mut row, result) in table.rows_mut().zip(rows) {
            write_row(&mut row, result);
        }
        Some(table)
    }

    /// Results of partition `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= PARTITION_COUNT`.
    #[must_use]
    pub fn row(&self, index: usize) -> PartitionResult {
        let row = self.data.row(index);
        PartitionResult {
            root_sum_squares: row[Statistic::RootSumSquares.column()],
            geometric_average: row[Statistic::GeometricAverage.column()],
            arithmetic_average: row[Statistic::ArithmeticAverage.column()],
        }
    }

    /// All partition results in index order
    pub fn rows(&self) -> impl Iterator<Item = PartitionResult> + '_ {
        (0..self.len()).map(|index| self.row(index))
    }

    /// One statistic across every partition
    #[must_use]
    pub fn column(&self, statistic: Statistic) -> ArrayView1<'_, f64> {
        self.data.column(statistic.column())
    }

    /// Number of partition rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Underlying `(partition, statistic)` array
    #[must_use]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Disjoint mutable rows, one per partition
    pub(crate) fn rows_mut(&mut self) -> ndarray::iter::AxisIterMut<'_, f64, ndarray::Ix1> {
        self.data.axis_iter_mut(Axis(0))
    }
}

pub(crate) fn write_row(row: &mut ArrayViewMut1<'_, f64>, result: &PartitionResult) {
    for statistic in Statistic::ALL {
        row[statistic.column()] = result.get(statistic);
    }
}

/// Minimum of each statistic across all partitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub min_root_sum_squares: f64,
    pub min_geometric_average: f64,
    pub min_arithmetic_average: f64,
}

impl AggregateResult {
    #[must_use]
    pub const fn get(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::RootSumSquares => self.min_root_sum_squares,
            Statistic::GeometricAverage => self.min_geometric_average,
            Statistic::ArithmeticAverage => self.min_arithmetic_average,
        }
    }
}

/// Compute the minimum of every statistic column
///
/// NaN cells never compare lower and are skipped; a column with no
/// comparable value reports `+inf`. Only the minimum value is reported, not
/// which partition produced it.
#[must_use]
pub fn aggregate(table: &ResultTable) -> AggregateResult {
    let minimums = table
        .as_array()
        .fold_axis(Axis(0), f64::INFINITY, |&acc, &x| if x < acc { x } else { acc });

    AggregateResult {
        min_root_sum_squares: minimums[Statistic::RootSumSquares.column()],
        min_geometric_average: minimums[Statistic::GeometricAverage.column()],
        min_arithmetic_average: minimums[Statistic::ArithmeticAverage.column()],
    }
}
