//! Summary statistics over cross-validation scores.
//!
//! Score matrices are stored row-major: one row per training size, one column
//! per fold. The helpers here reduce each row to its mean and its population
//! standard deviation.

pub mod descriptive;

use crate::error::Result;

/// Arithmetic mean of a sequence
///
/// # Example
/// ```rust
/// use learnplot::stats;
///
/// let m = stats::mean(&[1.0, 2.0, 3.0]).unwrap();
/// assert!((m - 2.0).abs() < 1e-12);
/// ```
pub fn mean<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::mean_impl(data.as_ref())
}

/// Population standard deviation (divides by `n`, not `n - 1`)
///
/// # Example
/// ```rust
/// use learnplot::stats;
///
/// let s = stats::population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((s - 2.0).abs() < 1e-12);
/// ```
pub fn population_std<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::population_std_impl(data.as_ref())
}

/// Mean and population standard deviation of every row of a matrix
///
/// Returns `(means, stds)`, each with one entry per row.
pub fn row_mean_std(rows: &[Vec<f64>]) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut means = Vec::with_capacity(rows.len());
    let mut stds = Vec::with_capacity(rows.len());

    for row in rows {
        let (m, s) = descriptive::mean_std_impl(row)?;
        means.push(m);
        stds.push(s);
    }

    Ok((means, stds))
}
