//! Core statistical operations
//!
//! Each [`Statistic`] is a pure reduction over a read-only slice of integers.
//! Elements are promoted to `f64` before any arithmetic so that squaring and
//! summing 1000 `i32` values cannot overflow.

use ndarray::ArrayView1;

/// Number of statistics computed per partition
pub const STATISTIC_COUNT: usize = 3;

/// Supported statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Square root of the sum of squared elements
    RootSumSquares,
    /// Product of the per-element n-th roots
    GeometricAverage,
    /// Sum divided by element count
    ArithmeticAverage,
}

impl Statistic {
    /// Every statistic, in result-table column order
    pub const ALL: [Statistic; STATISTIC_COUNT] = [
        Self::RootSumSquares,
        Self::GeometricAverage,
        Self::ArithmeticAverage,
    ];

    /// Get the string representation of the statistic
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RootSumSquares => "root_sum_squares",
            Self::GeometricAverage => "geometric_average",
            Self::ArithmeticAverage => "arithmetic_average",
        }
    }

    /// Human readable label used in text reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RootSumSquares => "Root of the Sum of Squares",
            Self::GeometricAverage => "Geometric Average",
            Self::ArithmeticAverage => "Arithmetic Average",
        }
    }

    /// Column of this statistic in a result table
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            Self::RootSumSquares => 0,
            Self::GeometricAverage => 1,
            Self::ArithmeticAverage => 2,
        }
    }

    /// Run this statistic over `values`
    #[must_use]
    pub fn compute(self, values: ArrayView1<'_, i32>) -> f64 {
        match self {
            Self::RootSumSquares => root_of_sum_of_squares(values),
            Self::GeometricAverage => geometric_average(values),
            Self::ArithmeticAverage => arithmetic_average(values),
        }
    }
}

/// Square root of the sum of the squares of `values`
#[must_use]
pub fn root_of_sum_of_squares(values: ArrayView1<'_, i32>) -> f64 {
    values
        .fold(0.0_f64, |acc, &x| {
            let x = f64::from(x);
            acc + x * x
        })
        .sqrt()
}

/// Geometric average computed as the product of each element's n-th root
///
/// Taking the root per element keeps the running product near the magnitude
/// of the result instead of overflowing. A zero element yields 0 and a
/// negative element yields NaN; both propagate as-is.
#[must_use]
pub fn geometric_average(values: ArrayView1<'_, i32>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let exponent = 1.0 / values.len() as f64;
    values.fold(1.0_f64, |product, &x| product * f64::from(x).powf(exponent))
}

/// Sum of `values` divided by their count (NaN for an empty view)
#[must_use]
pub fn arithmetic_average(values: ArrayView1<'_, i32>) -> f64 {
    let sum = values.fold(0.0_f64, |acc, &x| acc + f64::from(x));
    #[allow(clippy::cast_precision_loss)]
    {
        sum / values.len() as f64
    }
}
