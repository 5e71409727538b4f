//! `sidefit` library crate.
//!
//! The binary (`sidefit`) is a thin wrapper around this library so that:
//!
//! - the search is testable without spawning processes
//! - the interpolation and window code can be reused from other tools
//!
//! The core entry points are [`fit::Fitter`] and [`fit::nearest_distances`].

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
