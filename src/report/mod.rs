//! Reporting utilities: residual summaries and the exported run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InterpKind, PointOutcome, SearchOptions};

pub mod format;

pub use format::*;

/// Summary statistics over one residual vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualSummary {
    pub n: usize,
    /// Points whose window was degenerate and used the vertical offset.
    pub fallback_count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub rms: f64,
}

/// Portable record of a run (written as JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub kind: InterpKind,
    pub options: SearchOptions,
    pub summary: ResidualSummary,
    pub residuals: Vec<f64>,
    pub outcomes: Vec<PointOutcome>,
}

impl RunReport {
    pub fn new(kind: InterpKind, options: SearchOptions, outcomes: &[PointOutcome]) -> Self {
        Self {
            tool: "sidefit".to_string(),
            generated_at: Utc::now(),
            kind,
            options,
            summary: summarize(outcomes),
            residuals: outcomes.iter().map(PointOutcome::distance).collect(),
            outcomes: outcomes.to_vec(),
        }
    }
}

/// Summarize per-point outcomes. An empty input yields zeros.
pub fn summarize(outcomes: &[PointOutcome]) -> ResidualSummary {
    let n = outcomes.len();
    if n == 0 {
        return ResidualSummary {
            n: 0,
            fallback_count: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            rms: 0.0,
        };
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut fallback_count = 0;
    for o in outcomes {
        let d = o.distance();
        min = min.min(d);
        max = max.max(d);
        sum += d;
        sum_sq += d * d;
        if o.is_fallback() {
            fallback_count += 1;
        }
    }

    ResidualSummary {
        n,
        fallback_count,
        min,
        max,
        mean: sum / n as f64,
        rms: (sum_sq / n as f64).sqrt(),
    }
}
