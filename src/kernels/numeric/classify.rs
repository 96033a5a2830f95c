//! Numeric classification of flat sequences.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use crate::kernels::PARALLEL_THRESHOLD;
use crate::scalar::{is_plain_decimal, Scalar};

#[inline]
fn is_numeric_fast(s: &Scalar) -> bool {
    match s {
        Scalar::Text(t) => is_plain_decimal(t.as_bytes()) || s.is_numeric(),
        other => other.is_numeric(),
    }
}

/// Returns `true` iff every element denotes a finite number.
///
/// Plain decimals are recognised by a byte scan; only text with exponents or
/// padding reaches the float parser. Stops at the first non-numeric element.
#[must_use]
pub fn is_all_numeric(seq: &[Scalar]) -> bool {
    #[cfg(feature = "parallel")]
    {
        if seq.len() >= PARALLEL_THRESHOLD {
            return seq.par_iter().all(is_numeric_fast);
        }
    }
    seq.iter().all(is_numeric_fast)
}

/// Element-by-element reference for [`is_all_numeric`].
#[must_use]
pub fn naive_is_all_numeric(seq: &[Scalar]) -> bool {
    for s in seq {
        if !s.is_numeric() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed(multiple: usize) -> Vec<Scalar> {
        let unit = [
            Scalar::from("1"),
            Scalar::Int(2),
            Scalar::Float(3.4),
            Scalar::from("5.6"),
        ];
        unit.iter().cycle().take(unit.len() * multiple).cloned().collect()
    }

    #[test]
    fn test_empty_is_numeric() {
        assert!(is_all_numeric(&[]));
        assert!(naive_is_all_numeric(&[]));
    }

    #[test]
    fn test_mixed_numeric() {
        let seq = mixed(10);
        assert!(is_all_numeric(&seq));
        assert!(naive_is_all_numeric(&seq));
    }

    #[test]
    fn test_two_decimal_points_fail() {
        let mut seq = mixed(10);
        seq.push(Scalar::from("7.8.9"));
        assert!(!is_all_numeric(&seq));
        assert!(!naive_is_all_numeric(&seq));
    }

    #[test]
    fn test_exponent_and_padding_use_full_parse() {
        let seq = vec![Scalar::from("1e-3"), Scalar::from(" 42 "), Scalar::from("+.5")];
        assert!(is_all_numeric(&seq));
        assert!(naive_is_all_numeric(&seq));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [
            Scalar::Float(f64::NAN),
            Scalar::Float(f64::NEG_INFINITY),
            Scalar::from("inf"),
            Scalar::from("1e400"),
            Scalar::from(""),
        ] {
            let seq = vec![Scalar::Int(1), bad.clone()];
            assert!(!is_all_numeric(&seq), "{bad} accepted");
            assert!(!naive_is_all_numeric(&seq), "{bad} accepted");
        }
    }

    #[test]
    fn test_large_input_agrees() {
        let mut seq = mixed(crate::kernels::PARALLEL_THRESHOLD);
        assert!(is_all_numeric(&seq));
        let mid = seq.len() / 2;
        seq[mid] = Scalar::from("x");
        assert!(!is_all_numeric(&seq));
        assert!(!naive_is_all_numeric(&seq));
    }
}
