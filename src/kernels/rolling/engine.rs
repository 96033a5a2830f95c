//! Streaming rolling statistics in O(n), independent of the window size.
//!
//! The mean/variance pass slides a Welford accumulator: each step replaces
//! the outgoing element with the incoming one in O(1),
//!
//! ```text
//! delta  = x_in - x_out
//! mean' = mean + delta / w
//! m2'   = m2 + delta * (x_in - mean' + x_out - mean)
//! var   = m2 / w
//! ```
//!
//! Rounding drift is bounded by recomputing the accumulator exactly every
//! `max(w, RESYNC_INTERVAL)` steps. Windows that hold a non-finite value are
//! evaluated directly, and the accumulator is rebuilt once the window is
//! finite again. The same holds when finite input overflows the update
//! itself (`x_in - x_out` beyond `f64::MAX`).

use super::naive::window_mean_var;
use super::{check_window, stds_from_vars, RESYNC_INTERVAL};
use crate::error::Result;

/// Sliding Welford accumulator over a full window.
#[derive(Debug, Clone, Copy)]
struct SlidingMoments {
    len: f64,
    mean: f64,
    m2: f64,
}

impl SlidingMoments {
    /// Exact two-pass state for `xs`.
    fn from_window(xs: &[f64]) -> Self {
        let len = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / len;
        let m2 = xs
            .iter()
            .map(|x| {
                let d = x - mean;
                d * d
            })
            .sum();
        Self { len, mean, m2 }
    }

    #[inline(always)]
    fn replace(&mut self, outgoing: f64, incoming: f64) {
        let old_mean = self.mean;
        let delta = incoming - outgoing;
        self.mean += delta / self.len;
        self.m2 += delta * (incoming - self.mean + outgoing - old_mean);
        if self.m2 < 0.0 {
            self.m2 = 0.0;
        }
    }

    #[inline(always)]
    fn variance(&self) -> f64 {
        self.m2 / self.len
    }

    #[inline(always)]
    fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.m2.is_finite()
    }
}

/// Counts non-finite values in the current window.
#[inline(always)]
fn non_finite(x: f64) -> usize {
    usize::from(!x.is_finite())
}

/// Rolling window sums: a running sum with the same resync and
/// non-finite handling as the mean/variance pass.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_sum(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    check_window(xs.len(), window)?;
    let n = xs.len();
    let resync_every = window.max(RESYNC_INTERVAL);

    let mut out = Vec::with_capacity(n - window + 1);
    let mut dirty: usize = xs[..window].iter().map(|&x| non_finite(x)).sum();
    let mut sum: f64 = xs[..window].iter().sum();
    let mut stale = dirty > 0;
    let mut since_sync = 0usize;
    out.push(sum);

    for end in window..n {
        let incoming = xs[end];
        let outgoing = xs[end - window];
        dirty = dirty + non_finite(incoming) - non_finite(outgoing);
        let win = &xs[end + 1 - window..=end];

        if dirty > 0 {
            stale = true;
            out.push(win.iter().sum::<f64>());
            continue;
        }

        since_sync += 1;
        if stale || since_sync >= resync_every {
            sum = win.iter().sum();
            since_sync = 0;
            stale = false;
        } else {
            sum += incoming - outgoing;
            if !sum.is_finite() {
                sum = win.iter().sum();
                since_sync = 0;
            }
        }
        out.push(sum);
    }
    Ok(out)
}

/// Rolling means and population variances in one streaming pass.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_mean_var(xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    check_window(xs.len(), window)?;
    let n = xs.len();
    if window == 1 {
        return Ok((xs.to_vec(), vec![0.0; n]));
    }

    let out_len = n - window + 1;
    let resync_every = window.max(RESYNC_INTERVAL);
    let mut means = Vec::with_capacity(out_len);
    let mut vars = Vec::with_capacity(out_len);

    let first = &xs[..window];
    let mut dirty: usize = first.iter().map(|&x| non_finite(x)).sum();
    let mut acc = SlidingMoments::from_window(first);
    let mut stale = dirty > 0 || !acc.is_finite();
    let mut since_sync = 0usize;
    if stale {
        let (m, v) = window_mean_var(first);
        means.push(m);
        vars.push(v);
    } else {
        means.push(acc.mean);
        vars.push(acc.variance());
    }

    for end in window..n {
        let incoming = xs[end];
        let outgoing = xs[end - window];
        dirty = dirty + non_finite(incoming) - non_finite(outgoing);
        let win = &xs[end + 1 - window..=end];

        if dirty > 0 {
            stale = true;
            let (m, v) = window_mean_var(win);
            means.push(m);
            vars.push(v);
            continue;
        }

        since_sync += 1;
        if stale || since_sync >= resync_every {
            acc = SlidingMoments::from_window(win);
            since_sync = 0;
            stale = false;
        } else {
            acc.replace(outgoing, incoming);
            if !acc.is_finite() {
                acc = SlidingMoments::from_window(win);
                since_sync = 0;
            }
        }
        // Finite values whose moments overflow.
        if !acc.is_finite() {
            stale = true;
            let (m, v) = window_mean_var(win);
            means.push(m);
            vars.push(v);
            continue;
        }
        means.push(acc.mean);
        vars.push(acc.variance());
    }
    Ok((means, vars))
}

/// Rolling means.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_mean(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(rolling_mean_var(xs, window)?.0)
}

/// Rolling population variances.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_var(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(rolling_mean_var(xs, window)?.1)
}

/// Rolling population standard deviations.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_std(xs: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_var(xs, window).map(stds_from_vars)
}

/// Rolling means and population standard deviations in one pass.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] unless `1 <= window <= xs.len()`.
pub fn rolling_mean_std(xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let (means, vars) = rolling_mean_var(xs, window)?;
    Ok((means, stds_from_vars(vars)))
}

#[cfg(test)]
mod tests {
    use super::super::naive::{naive_rolling_mean_var, naive_rolling_sum};
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        if a.is_nan() && b.is_nan() {
            return true;
        }
        if a == b {
            return true;
        }
        (a - b).abs() <= eps * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_arange_window_three() {
        let n = 10_000;
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let (means, stds) = rolling_mean_std(&xs, 3).unwrap();
        assert_eq!(means.len(), n - 2);
        let expected_std = (2.0f64 / 3.0).sqrt();
        for (i, (m, s)) in means.iter().zip(&stds).enumerate() {
            assert!(approx_eq(*m, (i + 1) as f64, 1e-12), "mean[{i}] = {m}");
            assert!((s - expected_std).abs() < 1e-9, "std[{i}] = {s}");
        }
    }

    #[test]
    fn test_full_window_is_global_statistic() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (means, stds) = rolling_mean_std(&xs, xs.len()).unwrap();
        assert_eq!(means, vec![5.0]);
        assert!(approx_eq(stds[0], 2.0, 1e-12));
    }

    #[test]
    fn test_unit_window() {
        let xs = [0.1, -3.0, 7.25];
        let (means, stds) = rolling_mean_std(&xs, 1).unwrap();
        assert_eq!(means, xs.to_vec());
        assert_eq!(stds, vec![0.0; 3]);
    }

    #[test]
    fn test_invalid_windows() {
        assert!(rolling_mean(&[1.0, 2.0], 0).is_err());
        assert!(rolling_std(&[1.0, 2.0], 3).is_err());
        assert!(rolling_sum(&[], 1).is_err());
    }

    #[test]
    fn test_non_finite_windows_match_reference() {
        let xs = [1.0, 2.0, f64::NAN, 4.0, 5.0, f64::INFINITY, 7.0, 8.0, 9.0, 10.0];
        let (means, vars) = rolling_mean_var(&xs, 3).unwrap();
        let (ref_means, ref_vars) = naive_rolling_mean_var(&xs, 3).unwrap();
        for i in 0..means.len() {
            assert!(approx_eq(means[i], ref_means[i], 1e-12), "mean[{i}]");
            assert!(approx_eq(vars[i], ref_vars[i], 1e-12), "var[{i}]");
        }
        assert!(means[0].is_nan());
        assert_eq!(means[3], f64::INFINITY);
        assert_eq!(means[6], 8.0);
        assert_eq!(means[7], 9.0);

        let sums = rolling_sum(&xs, 3).unwrap();
        let ref_sums = naive_rolling_sum(&xs, 3).unwrap();
        for i in 0..sums.len() {
            assert!(approx_eq(sums[i], ref_sums[i], 1e-12), "sum[{i}]");
        }
    }

    #[test]
    fn test_overflowing_update_recovers() {
        let mut xs = vec![-1e308, 0.0, 1e308];
        xs.extend([0.0; 20]);
        let (means, vars) = rolling_mean_var(&xs, 2).unwrap();
        let (ref_means, ref_vars) = naive_rolling_mean_var(&xs, 2).unwrap();
        for i in 0..means.len() {
            assert!(approx_eq(means[i], ref_means[i], 1e-12), "mean[{i}]");
            assert!(approx_eq(vars[i], ref_vars[i], 1e-12), "var[{i}]");
        }
        assert_eq!(means[1], 5e307);
        assert!(means[3..].iter().all(|&m| m == 0.0));
        assert!(vars[3..].iter().all(|&v| v == 0.0));

        let sums = rolling_sum(&xs, 2).unwrap();
        let ref_sums = naive_rolling_sum(&xs, 2).unwrap();
        assert_eq!(sums, ref_sums);
        assert_eq!(&sums[..3], &[-1e308, 1e308, 1e308]);
        assert!(sums[3..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_long_series_stays_accurate() {
        let n = 3 * RESYNC_INTERVAL + 17;
        let xs: Vec<f64> = (0..n)
            .map(|i| 1e6 + ((i * 7919) % 1009) as f64 * 0.37)
            .collect();
        let (means, vars) = rolling_mean_var(&xs, 25).unwrap();
        let (ref_means, ref_vars) = naive_rolling_mean_var(&xs, 25).unwrap();
        for i in 0..means.len() {
            assert!(approx_eq(means[i], ref_means[i], 1e-9), "mean[{i}]");
            assert!(approx_eq(vars[i], ref_vars[i], 1e-6), "var[{i}]");
        }
        let sums = rolling_sum(&xs, 25).unwrap();
        let ref_sums = naive_rolling_sum(&xs, 25).unwrap();
        for i in 0..sums.len() {
            assert!(approx_eq(sums[i], ref_sums[i], 1e-9), "sum[{i}]");
        }
    }
}
