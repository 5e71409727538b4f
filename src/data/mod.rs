//! Data sources for runs that don't read input files.

pub mod sample;

pub use sample::*;
