//! Synthetic step-function scenarios.
//!
//! The reference scenario is a Heaviside step sampled on `[-1, 1)` with
//! spacing `0.001`: 1000 samples at `0.0` followed by 1000 samples at `1.0`,
//! the jump sitting at index 1000 (`x = 0`). Observations are the same step
//! smoothed by a narrow sigmoid around the jump, optionally with Gaussian
//! noise on top.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{ModelCurve, ObservationSet};
use crate::error::SidefitError;

/// Number of model samples in the step scenario.
pub const STEP_SAMPLES: usize = 2000;

/// Index of the first sample on the upper branch (`x = 0`).
pub const STEP_INDEX: usize = 1000;

const STEP_START: f64 = -1.0;
const STEP_SPACING: f64 = 0.001;

/// Sigmoid width used for the smoothed observations.
pub const SIGMOID_NORM: f64 = 0.01;

/// Half-width (in samples) of the smoothed region around the jump.
const SMOOTH_HALF_WIDTH: usize = 100;

/// Options for the demo sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    /// Standard deviation of Gaussian noise added to the observed y (0 disables).
    pub noise_sigma: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            noise_sigma: 0.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub model: ModelCurve,
    pub points: ObservationSet,
}

/// The hard step model.
pub fn step_curve() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..STEP_SAMPLES)
        .map(|i| STEP_START + i as f64 * STEP_SPACING)
        .collect();
    let y: Vec<f64> = (0..STEP_SAMPLES)
        .map(|i| if i < STEP_INDEX { 0.0 } else { 1.0 })
        .collect();
    (x, y)
}

/// Logistic function that looks like a smooth step of width ~`norm`.
pub fn sigmoid(x: f64, norm: f64) -> f64 {
    1.0 / (1.0 + (-x / norm).exp())
}

/// The step with a sigmoid transition over `[STEP_INDEX - 100, STEP_INDEX + 100)`.
pub fn sigmoid_smoothed() -> (Vec<f64>, Vec<f64>) {
    let (x, mut y) = step_curve();
    for i in STEP_INDEX - SMOOTH_HALF_WIDTH..STEP_INDEX + SMOOTH_HALF_WIDTH {
        y[i] = sigmoid(x[i], SIGMOID_NORM);
    }
    (x, y)
}

/// Add seeded Gaussian noise to `y`.
pub fn add_noise(y: &[f64], sigma: f64, seed: u64) -> Result<Vec<f64>, SidefitError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(SidefitError::InvalidConfig(format!(
            "noise sigma must be finite and >= 0, got {sigma}"
        )));
    }
    if sigma == 0.0 {
        return Ok(y.to_vec());
    }
    let normal = Normal::new(0.0, sigma)
        .map_err(|e| SidefitError::InvalidConfig(format!("noise sigma {sigma}: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(y.iter().map(|v| v + normal.sample(&mut rng)).collect())
}

/// Hard-step model with sigmoid-smoothed (and optionally noisy) observations.
pub fn demo_sample(config: &SampleConfig) -> Result<SampleData, SidefitError> {
    let (x, y) = step_curve();
    let (px, py) = sigmoid_smoothed();
    let py = add_noise(&py, config.noise_sigma, config.seed)?;

    Ok(SampleData {
        model: ModelCurve::new(x, y)?,
        points: ObservationSet::new(px, py)?,
    })
}
