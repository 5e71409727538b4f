//! Shared search pipeline used by every subcommand.
//!
//! interpolate -> windowed search -> summary
//!
//! The subcommands only differ in where the model and points come from.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

use crate::domain::{ModelCurve, ObservationSet, PointOutcome, RunConfig};
use crate::error::AppError;
use crate::fit::Fitter;
use crate::report::ResidualSummary;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub points: ObservationSet,
    pub outcomes: Vec<PointOutcome>,
    pub residuals: Vec<f64>,
    pub summary: ResidualSummary,
}

/// Run the residual search for one model/points pair.
pub fn run_search(model: ModelCurve, points: ObservationSet, config: &RunConfig) -> Result<RunOutput, AppError> {
    config.search.validate()?;

    let total = points.len();
    let mut fitter = Fitter::new(model, points);
    fitter.interpolate(config.kind);

    let done = AtomicUsize::new(0);
    let step = (total / 10).max(1);
    let progress = || {
        let n = done.fetch_add(1, Ordering::Relaxed) + 1;
        if n % step == 0 || n == total {
            info!(done = n, total, "search progress");
        }
    };

    let residuals = fitter.brute_force_with_progress(&config.search, &progress)?.to_vec();
    let outcomes = fitter.outcomes().map(<[PointOutcome]>::to_vec).unwrap_or_default();
    let summary = crate::report::summarize(&outcomes);

    if summary.fallback_count > 0 {
        info!(
            fallback = summary.fallback_count,
            "some points used the vertical-offset fallback"
        );
    }

    Ok(RunOutput {
        points: fitter.points().clone(),
        outcomes,
        residuals,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleConfig, demo_sample};
    use crate::domain::{InterpKind, SearchOptions};

    fn config(kind: InterpKind) -> RunConfig {
        RunConfig {
            kind,
            search: SearchOptions {
                window_half_width: 20,
                samples_per_window: 400,
                refine: true,
            },
            top_n: 0,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn demo_pipeline_produces_one_residual_per_point() {
        let sample = demo_sample(&SampleConfig::default()).unwrap();
        let n = sample.points.len();
        let out = run_search(sample.model, sample.points, &config(InterpKind::Linear)).unwrap();
        assert_eq!(out.residuals.len(), n);
        assert_eq!(out.outcomes.len(), n);
        assert_eq!(out.summary.n, n);
        assert!(out.residuals.iter().all(|r| r.is_finite() && *r >= 0.0));
    }

    #[test]
    fn invalid_options_are_input_errors() {
        let sample = demo_sample(&SampleConfig::default()).unwrap();
        let mut cfg = config(InterpKind::Linear);
        cfg.search.samples_per_window = 0;
        let err = run_search(sample.model, sample.points, &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
