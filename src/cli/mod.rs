//! Command-line parsing for the `sidefit` binary.
//!
//! Argument parsing and command dispatch stay separate from the search code.
//! Search flags are optional so that unset flags fall back to `.env`
//! overrides and then to the built-in defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::InterpKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sidefit", version, about = "Nearest-point residuals between observations and a sampled model curve")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute residuals for points read from CSV against a model read from CSV.
    Residuals(ResidualArgs),
    /// Run the built-in step-function scenario.
    Demo(DemoArgs),
}

/// Inputs for `sidefit residuals`.
#[derive(Debug, Parser, Clone)]
pub struct ResidualArgs {
    /// Model samples (CSV with `x`,`y` columns, x strictly increasing).
    #[arg(long, value_name = "CSV")]
    pub model: PathBuf,

    /// Observation points (CSV with `x`,`y` or `px`,`py` columns), aligned to model rows.
    #[arg(long, value_name = "CSV")]
    pub points: PathBuf,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Options for `sidefit demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Standard deviation of Gaussian noise added to the observations.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Search and output options shared by all subcommands.
#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Interpolation kind for the model curve.
    #[arg(long, value_enum)]
    pub kind: Option<InterpKind>,

    /// Model samples searched on each side of a point's aligned index.
    #[arg(long)]
    pub half_width: Option<usize>,

    /// Objective evaluations per full-width window.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Skip the golden-section polish of the grid minimum.
    #[arg(long)]
    pub no_refine: bool,

    /// Show the N largest residuals.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run report to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
