//! Sliding-window statistics.
//!
//! Output has one value per full window (length `n - window + 1`). Variance
//! and standard deviation use the population denominator (`window`).

pub mod engine;
pub mod naive;

use crate::error::{Error, Result};

/// Steps between exact recomputations of the streaming accumulators.
///
/// The effective period is `max(window, RESYNC_INTERVAL)`, which keeps the
/// resync cost O(n) in total.
pub const RESYNC_INTERVAL: usize = 4096;

/// Rejects windows outside `1..=len`.
pub(crate) fn check_window(len: usize, window: usize) -> Result<()> {
    if window == 0 || window > len {
        return Err(Error::InvalidWindow { window, len });
    }
    Ok(())
}

/// Element-wise square root of a variance series.
pub(crate) fn stds_from_vars(vars: Vec<f64>) -> Vec<f64> {
    vars.into_iter().map(f64::sqrt).collect()
}
