//! Interchangeable kernel strategies.
//!
//! [`OptimizedKernels`] and [`NaiveKernels`] implement the same
//! [`Preprocessor`] contract; [`Strategy`] picks one at runtime from the
//! names `"used"`/`"optimized"` and `"naive"`.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::kernels::numeric::remap::TransformTable;
use crate::kernels::numeric::{classify, coerce, remap};
use crate::kernels::rolling::{engine, naive, stds_from_vars};
use crate::scalar::Scalar;

/// The full kernel surface, once per strategy.
pub trait Preprocessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_all_numeric(&self, seq: &[Scalar]) -> bool;

    fn flat_arr_to_float32(&self, seq: &[Scalar]) -> Vec<f32>;

    fn transform_with_table(
        &self,
        buf: &[f32],
        table: &TransformTable,
        strict: bool,
    ) -> Result<Vec<f32>>;

    fn rolling_sum(&self, xs: &[f64], window: usize) -> Result<Vec<f64>>;

    fn rolling_mean_var(&self, xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)>;

    fn rolling_mean(&self, xs: &[f64], window: usize) -> Result<Vec<f64>> {
        Ok(self.rolling_mean_var(xs, window)?.0)
    }

    fn rolling_var(&self, xs: &[f64], window: usize) -> Result<Vec<f64>> {
        Ok(self.rolling_mean_var(xs, window)?.1)
    }

    fn rolling_std(&self, xs: &[f64], window: usize) -> Result<Vec<f64>> {
        Ok(self.rolling_mean_std(xs, window)?.1)
    }

    fn rolling_mean_std(&self, xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        let (means, vars) = self.rolling_mean_var(xs, window)?;
        Ok((means, stds_from_vars(vars)))
    }
}

/// Fast paths, rayon partitioning and O(n) rolling recurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedKernels;

/// Element-by-element references.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveKernels;

impl Preprocessor for OptimizedKernels {
    fn name(&self) -> &'static str {
        "used"
    }

    fn is_all_numeric(&self, seq: &[Scalar]) -> bool {
        classify::is_all_numeric(seq)
    }

    fn flat_arr_to_float32(&self, seq: &[Scalar]) -> Vec<f32> {
        coerce::flat_arr_to_float32(seq)
    }

    fn transform_with_table(
        &self,
        buf: &[f32],
        table: &TransformTable,
        strict: bool,
    ) -> Result<Vec<f32>> {
        remap::transform_with_table(buf, table, strict)
    }

    fn rolling_sum(&self, xs: &[f64], window: usize) -> Result<Vec<f64>> {
        engine::rolling_sum(xs, window)
    }

    fn rolling_mean_var(&self, xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        engine::rolling_mean_var(xs, window)
    }
}

impl Preprocessor for NaiveKernels {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn is_all_numeric(&self, seq: &[Scalar]) -> bool {
        classify::naive_is_all_numeric(seq)
    }

    fn flat_arr_to_float32(&self, seq: &[Scalar]) -> Vec<f32> {
        coerce::naive_flat_arr_to_float32(seq)
    }

    fn transform_with_table(
        &self,
        buf: &[f32],
        table: &TransformTable,
        strict: bool,
    ) -> Result<Vec<f32>> {
        remap::naive_transform_with_table(buf, table, strict)
    }

    fn rolling_sum(&self, xs: &[f64], window: usize) -> Result<Vec<f64>> {
        naive::naive_rolling_sum(xs, window)
    }

    fn rolling_mean_var(&self, xs: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        naive::naive_rolling_mean_var(xs, window)
    }
}

/// Runtime selector between the two kernel sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Optimized,
    Naive,
}

impl Strategy {
    #[must_use]
    pub fn preprocessor(self) -> &'static dyn Preprocessor {
        match self {
            Strategy::Optimized => &OptimizedKernels,
            Strategy::Naive => &NaiveKernels,
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "used" | "optimized" => Ok(Strategy::Optimized),
            "naive" => Ok(Strategy::Naive),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}
