//! cfc-rs: numeric-array preprocessing kernels for Python.
//!
//! Flat mixed-type sequences are classified, coerced into `float32` buffers
//! and remapped through lookup tables; numeric series get O(n) rolling
//! statistics. Every operation has an optimized and a `naive_` reference
//! variant with the same contract.

use numpy::{AllowTypeChange, PyArray1, PyArrayLike1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3::wrap_pyfunction;

pub mod error;
pub mod kernels;
pub mod scalar;
pub mod strategy;

pub use error::{Error, Result};
pub use kernels::numeric::remap::TransformTable;
pub use scalar::Scalar;
pub use strategy::{NaiveKernels, OptimizedKernels, Preprocessor, Strategy};

/// Convert a cfc-rs error to Python `ValueError`.
fn to_py_err(e: Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn table_from_dict(d: &Bound<'_, PyDict>) -> PyResult<TransformTable> {
    let mut pairs = Vec::with_capacity(d.len());
    for (k, v) in d.iter() {
        pairs.push((k.extract::<f64>()?, v.extract::<f64>()?));
    }
    TransformTable::from_pairs(pairs).map_err(to_py_err)
}

// ---------- classification / coercion ----------

#[pyfunction]
#[pyo3(name = "is_all_numeric")]
fn is_all_numeric_np(py: Python<'_>, seq: Vec<Scalar>) -> bool {
    py.allow_threads(|| OptimizedKernels.is_all_numeric(&seq))
}

#[pyfunction]
#[pyo3(name = "naive_is_all_numeric")]
fn naive_is_all_numeric_np(seq: Vec<Scalar>) -> bool {
    NaiveKernels.is_all_numeric(&seq)
}

/// Converts a flat sequence to `float32`; unparseable text becomes NaN.
#[pyfunction]
#[pyo3(name = "flat_arr_to_float32")]
fn flat_arr_to_float32_np<'py>(py: Python<'py>, seq: Vec<Scalar>) -> Bound<'py, PyArray1<f32>> {
    let v = py.allow_threads(|| OptimizedKernels.flat_arr_to_float32(&seq));
    PyArray1::from_vec_bound(py, v)
}

#[pyfunction]
#[pyo3(name = "naive_flat_arr_to_float32")]
fn naive_flat_arr_to_float32_np<'py>(
    py: Python<'py>,
    seq: Vec<Scalar>,
) -> Bound<'py, PyArray1<f32>> {
    PyArray1::from_vec_bound(py, NaiveKernels.flat_arr_to_float32(&seq))
}

/// Boolean mask of the elements `flat_arr_to_float32` turns into NaN
/// (plus non-finite numbers).
#[pyfunction]
#[pyo3(name = "invalid_mask")]
fn invalid_mask_np<'py>(py: Python<'py>, seq: Vec<Scalar>) -> Bound<'py, PyArray1<bool>> {
    PyArray1::from_vec_bound(py, kernels::numeric::coerce::invalid_mask(&seq))
}

// ---------- remapping ----------

fn transform_with<'py>(
    py: Python<'py>,
    kernels: &'static dyn Preprocessor,
    arr: &PyArrayLike1<'py, f32, AllowTypeChange>,
    transform_dict: &Bound<'py, PyDict>,
    strict: bool,
) -> PyResult<Bound<'py, PyArray1<f32>>> {
    let table = table_from_dict(transform_dict)?;
    let buf = arr.as_slice()?;
    let out = py
        .allow_threads(|| kernels.transform_with_table(buf, &table, strict))
        .map_err(to_py_err)?;
    Ok(PyArray1::from_vec_bound(py, out))
}

/// Replaces every value found in `transform_dict` by its mapped value.
///
/// Unmapped values pass through, or raise `ValueError` when `strict`.
#[pyfunction]
#[pyo3(name = "transform_flat_data_with_dict", signature = (arr, transform_dict, strict=false))]
fn transform_flat_data_with_dict_np<'py>(
    py: Python<'py>,
    arr: PyArrayLike1<'py, f32, AllowTypeChange>,
    transform_dict: &Bound<'py, PyDict>,
    strict: bool,
) -> PyResult<Bound<'py, PyArray1<f32>>> {
    transform_with(py, &OptimizedKernels, &arr, transform_dict, strict)
}

#[pyfunction]
#[pyo3(name = "naive_transform_flat_data_with_dict", signature = (arr, transform_dict, strict=false))]
fn naive_transform_flat_data_with_dict_np<'py>(
    py: Python<'py>,
    arr: PyArrayLike1<'py, f32, AllowTypeChange>,
    transform_dict: &Bound<'py, PyDict>,
    strict: bool,
) -> PyResult<Bound<'py, PyArray1<f32>>> {
    transform_with(py, &NaiveKernels, &arr, transform_dict, strict)
}

// ---------- rolling stats ----------

fn rolling_with<'py, F>(
    py: Python<'py>,
    arr: &PyArrayLike1<'py, f64, AllowTypeChange>,
    window: usize,
    strategy: &str,
    op: F,
) -> PyResult<Bound<'py, PyArray1<f64>>>
where
    F: Fn(&dyn Preprocessor, &[f64], usize) -> Result<Vec<f64>> + Send + Sync,
{
    let kernels = strategy.parse::<Strategy>().map_err(to_py_err)?.preprocessor();
    let xs = arr.as_slice()?;
    let v = py.allow_threads(|| op(kernels, xs, window)).map_err(to_py_err)?;
    Ok(PyArray1::from_vec_bound(py, v))
}

/// Sliding-window statistics; each output has length `len(arr) - window + 1`.
///
/// `strategy` is `"used"` (O(n) streaming) or `"naive"` (per-window
/// recomputation). Integer arrays are cast to float64.
#[pyclass(name = "RollingStat", module = "cfc_rs", frozen)]
struct RollingStat {}

#[pymethods]
impl RollingStat {
    #[staticmethod]
    #[pyo3(signature = (arr, window, strategy="used"))]
    fn sum<'py>(
        py: Python<'py>,
        arr: PyArrayLike1<'py, f64, AllowTypeChange>,
        window: usize,
        strategy: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        rolling_with(py, &arr, window, strategy, |k, xs, w| k.rolling_sum(xs, w))
    }

    #[staticmethod]
    #[pyo3(signature = (arr, window, strategy="used"))]
    fn mean<'py>(
        py: Python<'py>,
        arr: PyArrayLike1<'py, f64, AllowTypeChange>,
        window: usize,
        strategy: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        rolling_with(py, &arr, window, strategy, |k, xs, w| k.rolling_mean(xs, w))
    }

    /// Population variance (ddof=0).
    #[staticmethod]
    #[pyo3(signature = (arr, window, strategy="used"))]
    fn var<'py>(
        py: Python<'py>,
        arr: PyArrayLike1<'py, f64, AllowTypeChange>,
        window: usize,
        strategy: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        rolling_with(py, &arr, window, strategy, |k, xs, w| k.rolling_var(xs, w))
    }

    /// Population standard deviation (ddof=0).
    #[staticmethod]
    #[pyo3(signature = (arr, window, strategy="used"))]
    fn std<'py>(
        py: Python<'py>,
        arr: PyArrayLike1<'py, f64, AllowTypeChange>,
        window: usize,
        strategy: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        rolling_with(py, &arr, window, strategy, |k, xs, w| k.rolling_std(xs, w))
    }

    #[staticmethod]
    #[pyo3(signature = (arr, window, strategy="used"))]
    fn mean_std<'py>(
        py: Python<'py>,
        arr: PyArrayLike1<'py, f64, AllowTypeChange>,
        window: usize,
        strategy: &str,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
        let kernels = strategy.parse::<Strategy>().map_err(to_py_err)?.preprocessor();
        let xs = arr.as_slice()?;
        let (means, stds) = py
            .allow_threads(|| kernels.rolling_mean_std(xs, window))
            .map_err(to_py_err)?;
        Ok((
            PyArray1::from_vec_bound(py, means),
            PyArray1::from_vec_bound(py, stds),
        ))
    }
}

// ---------- module ----------

#[pymodule]
fn cfc_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(is_all_numeric_np, m)?)?;
    m.add_function(wrap_pyfunction!(naive_is_all_numeric_np, m)?)?;
    m.add_function(wrap_pyfunction!(flat_arr_to_float32_np, m)?)?;
    m.add_function(wrap_pyfunction!(naive_flat_arr_to_float32_np, m)?)?;
    m.add_function(wrap_pyfunction!(invalid_mask_np, m)?)?;

    m.add_function(wrap_pyfunction!(transform_flat_data_with_dict_np, m)?)?;
    m.add_function(wrap_pyfunction!(naive_transform_flat_data_with_dict_np, m)?)?;

    m.add_class::<RollingStat>()?;
    Ok(())
}
