//! Mathematical utilities: interpolation of the model samples.

pub mod interp;
pub mod spline;

pub use interp::*;
