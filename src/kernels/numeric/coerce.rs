//! Coercion of flat sequences into `f32` buffers.
//!
//! Unparseable text becomes `NaN`; the call itself never fails. The optimized
//! path parses plain decimals directly and defers everything else to
//! [`Scalar::to_f32`], which the reference uses throughout. A plain decimal
//! already passes the text rules, so outputs stay bit-identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
#[cfg(feature = "parallel")]
use crate::kernels::PARALLEL_THRESHOLD;
use crate::scalar::{is_plain_decimal, Scalar};

/// Skips the trim and byte filter for text the scanner accepts.
#[inline]
fn to_f32_fast(s: &Scalar) -> f32 {
    match s {
        Scalar::Text(t) if is_plain_decimal(t.as_bytes()) => {
            t.parse::<f64>().map_or(f32::NAN, |v| v as f32)
        }
        other => other.to_f32(),
    }
}

/// Converts every element to `f32`, writing `NaN` for unparseable text.
#[must_use]
pub fn flat_arr_to_float32(seq: &[Scalar]) -> Vec<f32> {
    #[cfg(feature = "parallel")]
    {
        if seq.len() >= PARALLEL_THRESHOLD {
            return seq.par_iter().map(to_f32_fast).collect();
        }
    }
    seq.iter().map(to_f32_fast).collect()
}

/// Element-by-element reference for [`flat_arr_to_float32`].
#[must_use]
pub fn naive_flat_arr_to_float32(seq: &[Scalar]) -> Vec<f32> {
    let mut out = Vec::with_capacity(seq.len());
    for s in seq {
        out.push(s.to_f32());
    }
    out
}

/// `true` at every position the classifier would reject.
#[must_use]
pub fn invalid_mask(seq: &[Scalar]) -> Vec<bool> {
    seq.iter().map(|s| !s.is_numeric()).collect()
}

/// Like [`flat_arr_to_float32`] but fails on the first non-numeric element.
///
/// # Errors
///
/// Returns [`Error::InvalidElement`] naming the first element that is not
/// numeric and its position.
pub fn try_flat_arr_to_float32(seq: &[Scalar]) -> Result<Vec<f32>> {
    if let Some(index) = seq.iter().position(|s| !s.is_numeric()) {
        return Err(Error::InvalidElement {
            index,
            value: seq[index].to_string(),
        });
    }
    Ok(flat_arr_to_float32(seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Scalar> {
        vec![
            Scalar::from("1"),
            Scalar::Int(2),
            Scalar::Float(3.4),
            Scalar::from("5.6"),
        ]
    }

    #[test]
    fn test_coerce_mixed() {
        let out = flat_arr_to_float32(&fixture());
        assert_eq!(out, vec![1.0, 2.0, 3.4, 5.6]);
        assert_eq!(out, naive_flat_arr_to_float32(&fixture()));
    }

    #[test]
    fn test_bad_text_becomes_nan() {
        let mut seq = fixture();
        seq.push(Scalar::from("7.8.9"));
        let out = flat_arr_to_float32(&seq);
        assert_eq!(out.len(), 5);
        assert!(out[4].is_nan());
        assert_eq!(&out[..4], &[1.0, 2.0, 3.4, 5.6]);
    }

    #[test]
    fn test_invalid_mask() {
        let seq = vec![Scalar::from("1"), Scalar::from("a"), Scalar::Float(f64::NAN)];
        assert_eq!(invalid_mask(&seq), vec![false, true, true]);
    }

    #[test]
    fn test_try_coerce_reports_first_bad_element() {
        let mut seq = fixture();
        seq.push(Scalar::from("7.8.9"));
        seq.push(Scalar::from("x"));
        let err = try_flat_arr_to_float32(&seq).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidElement {
                index: 4,
                value: "\"7.8.9\"".to_string(),
            }
        );
        assert_eq!(try_flat_arr_to_float32(&fixture()).unwrap().len(), 4);
    }

    #[test]
    fn test_plain_decimal_text_matches_reference() {
        let long = format!("-{}.{}", "9".repeat(150), "1".repeat(148));
        let seq: Vec<Scalar> = ["0", "+3.4", "-.5", "5.", "007.250", long.as_str(), " 5.6", "1e3"]
            .into_iter()
            .map(Scalar::from)
            .collect();
        let fast = flat_arr_to_float32(&seq);
        let naive = naive_flat_arr_to_float32(&seq);
        assert!(fast.iter().all(|v| !v.is_nan()));
        assert!(fast
            .iter()
            .zip(&naive)
            .all(|(a, b)| a.to_bits() == b.to_bits()));
        assert_eq!(fast[1], 3.4f32);
        assert_eq!(fast[2], -0.5);
        assert_eq!(fast[3], 5.0);
        assert_eq!(fast[4], 7.25);
    }

    #[test]
    fn test_large_input_is_bit_identical() {
        let seq: Vec<Scalar> = fixture()
            .into_iter()
            .cycle()
            .take(4 * crate::kernels::PARALLEL_THRESHOLD)
            .collect();
        let fast = flat_arr_to_float32(&seq);
        let naive = naive_flat_arr_to_float32(&seq);
        assert_eq!(fast.len(), seq.len());
        assert!(fast
            .iter()
            .zip(&naive)
            .all(|(a, b)| a.to_bits() == b.to_bits()));
    }
}
