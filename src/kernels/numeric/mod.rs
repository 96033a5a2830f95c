//! Flat-buffer kernels: mixed scalars in, `f32` buffers out.

pub mod classify;
pub mod coerce;
pub mod remap;
