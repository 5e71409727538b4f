//! Shared domain types.
//!
//! Inputs (`ModelCurve`, `ObservationSet`) are validated once at construction
//! and never mutated afterwards, so the search code can index them freely.

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SidefitError;

/// Default number of model samples searched on each side of a point.
pub const DEFAULT_HALF_WIDTH: usize = 100;

/// Default number of objective evaluations per full-width window.
pub const DEFAULT_SAMPLES: usize = 10_000;

/// How the model samples are turned into a continuous curve.
///
/// `Linear` is the robust choice. Higher-order kinds can overshoot near steps,
/// which shows up as spurious residuals next to discontinuities.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InterpKind {
    #[default]
    Linear,
    /// Value of the closest sample (ties go to the left sample).
    Nearest,
    /// Zero-order hold: value of the sample at or left of `x`.
    Previous,
    /// Value of the sample at or right of `x`.
    Next,
    /// Natural cubic spline.
    Cubic,
}

impl InterpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InterpKind::Linear => "linear",
            InterpKind::Nearest => "nearest",
            InterpKind::Previous => "previous",
            InterpKind::Next => "next",
            InterpKind::Cubic => "cubic",
        }
    }
}

impl FromStr for InterpKind {
    type Err = SidefitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "slinear" => Ok(InterpKind::Linear),
            "nearest" => Ok(InterpKind::Nearest),
            "previous" | "zero" => Ok(InterpKind::Previous),
            "next" => Ok(InterpKind::Next),
            "cubic" => Ok(InterpKind::Cubic),
            other => Err(SidefitError::InvalidConfig(format!(
                "unknown interpolation kind '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for InterpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sampled model curve: `x` strictly increasing, at least two samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ModelCurve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SidefitError> {
        validate_samples(&x, &y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Observation points, index-aligned with the model samples.
///
/// Point `i` is assumed to lie near `curve.x()[i]`; the search window is
/// centred on that index. Nothing checks this spatially: misaligned points
/// are searched in the wrong neighbourhood and get overstated residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ObservationSet {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SidefitError> {
        if x.len() != y.len() {
            return Err(SidefitError::LengthMismatch {
                what: "points x/y",
                left: x.len(),
                right: y.len(),
            });
        }
        check_finite("points x", &x)?;
        check_finite("points y", &y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Tuning knobs for the windowed nearest-point search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Model samples considered on each side of the aligned index.
    pub window_half_width: usize,
    /// Objective evaluations across a full (untruncated) window.
    pub samples_per_window: usize,
    /// Polish the best grid sample with a bracketed golden-section search.
    pub refine: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            window_half_width: DEFAULT_HALF_WIDTH,
            samples_per_window: DEFAULT_SAMPLES,
            refine: true,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<(), SidefitError> {
        if self.window_half_width == 0 {
            return Err(SidefitError::InvalidConfig(
                "window half-width must be > 0".to_string(),
            ));
        }
        if self.samples_per_window == 0 {
            return Err(SidefitError::InvalidConfig(
                "samples per window must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of searching a single observation point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PointOutcome {
    /// The window was searched; `x0` is where the minimum was found.
    Searched { distance: f64, x0: f64, samples: usize },
    /// The window was degenerate; `distance` is the vertical offset at `px`.
    Fallback { distance: f64 },
}

impl PointOutcome {
    pub fn distance(&self) -> f64 {
        match *self {
            PointOutcome::Searched { distance, .. } | PointOutcome::Fallback { distance } => distance,
        }
    }

    pub fn x0(&self) -> Option<f64> {
        match *self {
            PointOutcome::Searched { x0, .. } => Some(x0),
            PointOutcome::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PointOutcome::Fallback { .. })
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags, `.env` overrides and built-in defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub kind: InterpKind,
    pub search: SearchOptions,
    /// Rows in the largest-residuals table (0 disables it).
    pub top_n: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

fn validate_samples(x: &[f64], y: &[f64]) -> Result<(), SidefitError> {
    if x.len() != y.len() {
        return Err(SidefitError::LengthMismatch {
            what: "model x/y",
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(SidefitError::TooFewSamples { got: x.len(), min: 2 });
    }
    check_finite("model x", x)?;
    check_finite("model y", y)?;
    check_increasing(x)
}

pub(crate) fn check_increasing(x: &[f64]) -> Result<(), SidefitError> {
    match (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
        Some(index) => Err(SidefitError::NotIncreasing { index }),
        None => Ok(()),
    }
}

pub(crate) fn check_finite(what: &'static str, values: &[f64]) -> Result<(), SidefitError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SidefitError::NonFinite { what, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_curve_rejects_non_increasing_x() {
        let err = ModelCurve::new(vec![0.0, 1.0, 1.0], vec![0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(err, SidefitError::NotIncreasing { index: 2 });
    }

    #[test]
    fn model_curve_rejects_short_or_mismatched_input() {
        assert!(matches!(
            ModelCurve::new(vec![0.0], vec![0.0]),
            Err(SidefitError::TooFewSamples { got: 1, min: 2 })
        ));
        assert!(matches!(
            ModelCurve::new(vec![0.0, 1.0], vec![0.0]),
            Err(SidefitError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn observations_reject_nan() {
        let err = ObservationSet::new(vec![0.0, f64::NAN], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(err, SidefitError::NonFinite { what: "points x", index: 1 });
    }

    #[test]
    fn interp_kind_parses_case_insensitively() {
        assert_eq!("Linear".parse::<InterpKind>().unwrap(), InterpKind::Linear);
        assert_eq!("zero".parse::<InterpKind>().unwrap(), InterpKind::Previous);
        assert!("quintic".parse::<InterpKind>().is_err());
    }

    #[test]
    fn search_options_reject_zero_width() {
        let opts = SearchOptions {
            window_half_width: 0,
            ..SearchOptions::default()
        };
        assert!(opts.validate().is_err());
        assert!(SearchOptions::default().validate().is_ok());
    }
}
