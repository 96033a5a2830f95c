//! Dictionary-based remapping of `f32` buffers.
//!
//! Keys are narrowed to buffer width and compared by bit pattern, with
//! `-0.0` folded into `0.0` and every `NaN` folded into one canonical `NaN`.
//! A Python key `3.4` therefore matches a `float32` entry built from `3.4`;
//! values that narrow to different `f32`s never match.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
#[cfg(feature = "parallel")]
use crate::kernels::PARALLEL_THRESHOLD;

#[inline]
pub(crate) fn canonical_key(value: f32) -> u32 {
    if value.is_nan() {
        f32::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

/// A finite source → target mapping over buffer-width values.
#[derive(Debug, Clone, Default)]
pub struct TransformTable {
    entries: Vec<(f32, f32)>,
    index: HashMap<u32, f32>,
}

impl TransformTable {
    /// Builds a table from `(key, value)` pairs, narrowing both to `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] when two keys narrow to the same
    /// canonical value.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut table = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key as f32, value as f32);
            if table.index.insert(canonical_key(key), value).is_some() {
                return Err(Error::DuplicateKey { key });
            }
            table.entries.push((key, value));
        }
        Ok(table)
    }

    /// The table mapping every key onto itself.
    ///
    /// # Errors
    ///
    /// Same as [`TransformTable::from_pairs`].
    pub fn identity<I>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_pairs(keys.into_iter().map(|k| (k, k)))
    }

    /// Hashed lookup of `value`.
    #[inline]
    #[must_use]
    pub fn get(&self, value: f32) -> Option<f32> {
        self.index.get(&canonical_key(value)).copied()
    }

    /// Pairs in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(f32, f32)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remaps `buf` through `table` with hashed lookups.
///
/// Unmapped values pass through unchanged unless `strict` is set.
///
/// # Errors
///
/// In strict mode returns [`Error::UnmappedValue`] for the first value that
/// is not a key.
pub fn transform_with_table(buf: &[f32], table: &TransformTable, strict: bool) -> Result<Vec<f32>> {
    if strict {
        if let Some(index) = first_unmapped(buf, table) {
            return Err(Error::UnmappedValue {
                index,
                value: buf[index],
            });
        }
    }

    #[cfg(feature = "parallel")]
    {
        if buf.len() >= PARALLEL_THRESHOLD {
            return Ok(buf.par_iter().map(|&v| table.get(v).unwrap_or(v)).collect());
        }
    }
    Ok(buf.iter().map(|&v| table.get(v).unwrap_or(v)).collect())
}

fn first_unmapped(buf: &[f32], table: &TransformTable) -> Option<usize> {
    #[cfg(feature = "parallel")]
    {
        if buf.len() >= PARALLEL_THRESHOLD {
            return buf.par_iter().position_first(|&v| table.get(v).is_none());
        }
    }
    buf.iter().position(|&v| table.get(v).is_none())
}

/// Reference for [`transform_with_table`]: linear scan of the table per
/// element.
///
/// # Errors
///
/// Same as [`transform_with_table`].
pub fn naive_transform_with_table(
    buf: &[f32],
    table: &TransformTable,
    strict: bool,
) -> Result<Vec<f32>> {
    let mut out = Vec::with_capacity(buf.len());
    for (index, &v) in buf.iter().enumerate() {
        let key = canonical_key(v);
        match table.entries().iter().find(|(k, _)| canonical_key(*k) == key) {
            Some(&(_, mapped)) => out.push(mapped),
            None if strict => return Err(Error::UnmappedValue { index, value: v }),
            None => out.push(v),
        }
    }
    Ok(out)
}
