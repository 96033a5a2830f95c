//! Numeric kernels.
//!
//! - `numeric`: classification, coercion and remapping of flat buffers
//! - `rolling`: sliding-window statistics
//!
//! Every kernel comes as an optimized function and a `naive_` reference with
//! the same contract.

pub mod numeric;
pub mod rolling;

/// Inputs shorter than this stay on the calling thread even with `parallel`.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;
