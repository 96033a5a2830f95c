//! Error types for the preprocessing kernels.
//!
//! Single bad elements never produce an error: the classifier answers
//! `false` and the coercer writes a `NaN` sentinel. Errors are reserved for
//! invalid arguments and for the strict paths that explicitly ask for them.

use thiserror::Error;

/// The main error type for cfc-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The rolling window does not fit the input.
    ///
    /// A window must satisfy `1 <= window <= len`.
    #[error("invalid window {window}: must be between 1 and {len}")]
    InvalidWindow {
        /// The window size that was requested.
        window: usize,
        /// The length of the input series.
        len: usize,
    },

    /// A strict remap met a value that is not a key of the transform table.
    #[error("value {value} at index {index} is not a key of the transform table")]
    UnmappedValue {
        /// Position of the offending value in the buffer.
        index: usize,
        /// The offending value.
        value: f32,
    },

    /// A checked coercion met an element that does not parse as a number.
    #[error("element {value} at index {index} is not numeric")]
    InvalidElement {
        /// Position of the offending element in the sequence.
        index: usize,
        /// Rendering of the offending element.
        value: String,
    },

    /// Two transform keys collapse onto the same buffer-width value.
    #[error("duplicate transform key {key}")]
    DuplicateKey {
        /// The key, narrowed to buffer width.
        key: f32,
    },

    /// A strategy name that is neither the optimized nor the naive one.
    #[error("unknown strategy {0:?}: expected \"used\", \"optimized\" or \"naive\"")]
    UnknownStrategy(String),
}

/// Convenience type alias for Results using the cfc-rs Error type.
pub type Result<T> = std::result::Result<T, Error>;
