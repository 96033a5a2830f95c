//! Tagged scalars: the elements of a flat, mixed-type input sequence.
//!
//! A `Scalar` is numeric when it denotes a finite number:
//! - `Int` always does;
//! - `Float` does when it is finite;
//! - `Text` does when, after trimming surrounding whitespace, it is a decimal
//!   literal `[+-]?(d+ | d+.d* | d*.d+)([eE][+-]?d+)?` with a finite value.
//!
//! `"inf"`, `"nan"`, the empty string and anything with a second decimal
//! point (`"7.8.9"`) are not numeric. Neither is `Other`.

use std::fmt;

use pyo3::prelude::*;

/// One element of a flat input sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    /// Any element no other variant can hold (`None`, an `int` beyond
    /// `f64` range), kept as its `repr`.
    Other(String),
}

/// Tries `int`, then `float`, then `str`, so `bool` lands in `Int` and NumPy
/// scalars land in the matching variant. Never fails: whatever is left
/// becomes `Other`.
impl<'py> FromPyObject<'py> for Scalar {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if let Ok(i) = ob.extract::<i64>() {
            return Ok(Scalar::Int(i));
        }
        if let Ok(x) = ob.extract::<f64>() {
            return Ok(Scalar::Float(x));
        }
        if let Ok(s) = ob.extract::<String>() {
            return Ok(Scalar::Text(s));
        }
        let repr = ob
            .repr()
            .map_or_else(|_| String::from("<object>"), |r| r.to_string());
        Ok(Scalar::Other(repr))
    }
}

impl Scalar {
    /// Whether this element denotes a finite number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Scalar::Int(_) => true,
            Scalar::Float(x) => x.is_finite(),
            Scalar::Text(s) => parse_text(s).is_some(),
            Scalar::Other(_) => false,
        }
    }

    /// Narrows the element to buffer width, `NaN` when text fails to parse
    /// and for `Other`.
    ///
    /// Numbers pass through without text parsing; a non-finite `Float` keeps
    /// its value.
    #[inline]
    #[must_use]
    pub fn to_f32(&self) -> f32 {
        match self {
            Scalar::Int(i) => *i as f32,
            Scalar::Float(x) => *x as f32,
            Scalar::Text(s) => parse_text(s).map_or(f32::NAN, |v| v as f32),
            Scalar::Other(_) => f32::NAN,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s:?}"),
            Scalar::Other(repr) => f.write_str(repr),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// Parses numeric text to a finite `f64`.
///
/// The byte filter keeps the float parser from accepting the `inf`/`nan`
/// spellings it otherwise understands.
pub(crate) fn parse_text(s: &str) -> Option<f64> {
    let t = s.trim();
    if !t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest plain decimal accepted by [`is_plain_decimal`]; below 309 digits
/// a literal without exponent cannot overflow `f64`.
pub(crate) const PLAIN_DECIMAL_MAX_LEN: usize = 300;

/// Recognises `[+-]?(d+ | d+.d* | d*.d+)` without calling the float parser.
///
/// Every accepted input also satisfies [`parse_text`]; rejected inputs may
/// still be numeric (exponents, whitespace) and need the full parse.
#[inline]
pub(crate) fn is_plain_decimal(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() > PLAIN_DECIMAL_MAX_LEN {
        return false;
    }
    let digits = match bytes[0] {
        b'+' | b'-' => &bytes[1..],
        _ => bytes,
    };
    let mut seen_digit = false;
    let mut seen_dot = false;
    for &b in digits {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
