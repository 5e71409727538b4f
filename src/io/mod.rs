//! Input/output helpers.
//!
//! - CSV ingest of `(x, y)` series (`ingest`)
//! - per-point CSV and JSON report exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
