//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated inputs (`ModelCurve`, `ObservationSet`)
//! - configuration (`InterpKind`, `SearchOptions`, `RunConfig`)
//! - per-point search results (`PointOutcome`)

pub mod types;

pub use types::*;
