//! O(n * window) reference: every window evaluated from scratch.

use statrs::statistics::Statistics;

use super::{check_window, stds_from_vars};
use crate::error::Result;

/// Mean and population variance of one window.
///
/// Also used by the streaming engine for windows holding non-finite values,
/// so both paths agree on them exactly.
#[inline]
pub(crate) fn window_mean_var(xs: &[f64]) -> (f64, f64) {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    (mean, xs.iter().population_variance())
}

/// Sum of every window.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn naive_rolling_sum(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    check_window(xs.len(), window)?;
    Ok(xs.windows(window).map(|w| w.iter().sum::<f64>()).collect())
}

/// Mean of every window.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn naive_rolling_mean(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(naive_rolling_mean_var(xs, window)?.0)
}

/// Population variance of every window.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn naive_rolling_var(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(naive_rolling_mean_var(xs, window)?.1)
}

/// Population standard deviation of every window.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn naive_rolling_std(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    naive_rolling_var(xs, window).map(stds_from_vars)
}

/// Means and population variances of every window.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn naive_rolling_mean_var(xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    check_window(xs.len(), window)?;
    let out_len = xs.len() - window + 1;
    let mut means = Vec::with_capacity(out_len);
    let mut vars = Vec::with_capacity(out_len);
    for w in xs.windows(window) {
        let (m, v) = window_mean_var(w);
        means.push(m);
        vars.push(v);
    }
    Ok((means, vars))
}
