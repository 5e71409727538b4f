//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments and merges them with `.env` defaults
//! - loads or generates the input series
//! - runs the search and prints the report
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DemoArgs, ResidualArgs, SearchArgs};
use crate::config::EnvDefaults;
use crate::data::{SampleConfig, demo_sample};
use crate::domain::{ModelCurve, ObservationSet, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sidefit` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();
    let defaults = EnvDefaults::from_env()?;

    match cli.command {
        Command::Residuals(args) => handle_residuals(args, &defaults),
        Command::Demo(args) => handle_demo(args, &defaults),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sidefit=info"));
    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_residuals(args: ResidualArgs, defaults: &EnvDefaults) -> Result<(), AppError> {
    let config = run_config_from_args(&args.search, defaults);

    let model = crate::io::load_xy(&args.model)?.require_clean("model")?;
    let points = crate::io::load_xy(&args.points)?.require_clean("points")?;
    info!(
        model = model.x.len(),
        points = points.x.len(),
        "loaded input series"
    );

    let model = ModelCurve::new(model.x, model.y)?;
    let points = ObservationSet::new(points.x, points.y)?;
    finish(model, points, &config)
}

fn handle_demo(args: DemoArgs, defaults: &EnvDefaults) -> Result<(), AppError> {
    let config = run_config_from_args(&args.search, defaults);
    let sample = demo_sample(&SampleConfig {
        noise_sigma: args.noise,
        seed: args.seed,
    })?;
    info!(noise = args.noise, seed = args.seed, "generated step scenario");
    finish(sample.model, sample.points, &config)
}

fn finish(model: ModelCurve, points: ObservationSet, config: &RunConfig) -> Result<(), AppError> {
    let run = pipeline::run_search(model, points, config)?;

    println!(
        "{}",
        crate::report::format_summary(&run.summary, config.kind, &config.search)
    );
    if config.top_n > 0 {
        println!(
            "{}",
            crate::report::format_largest(&run.outcomes, run.points.x(), run.points.y(), config.top_n)
        );
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_residuals_csv(path, &run.points, &run.outcomes)?;
        info!(path = %path.display(), "wrote residual CSV");
    }
    if let Some(path) = &config.export_json {
        let report = crate::report::RunReport::new(config.kind, config.search, &run.outcomes);
        crate::io::write_report_json(path, &report)?;
        info!(path = %path.display(), "wrote run report");
    }

    Ok(())
}

/// Merge CLI flags over environment defaults.
pub fn run_config_from_args(args: &SearchArgs, defaults: &EnvDefaults) -> RunConfig {
    let mut search = defaults.search;
    if let Some(h) = args.half_width {
        search.window_half_width = h;
    }
    if let Some(n) = args.samples {
        search.samples_per_window = n;
    }
    if args.no_refine {
        search.refine = false;
    }

    RunConfig {
        kind: args.kind.unwrap_or(defaults.kind),
        search,
        top_n: args.top,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}
