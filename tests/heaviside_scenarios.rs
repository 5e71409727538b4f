use approx::assert_abs_diff_eq;

use sidefit::data::{STEP_INDEX, STEP_SAMPLES, SampleConfig, demo_sample, sigmoid_smoothed, step_curve};
use sidefit::domain::{InterpKind, SearchOptions};
use sidefit::fit::{Fitter, nearest_distances, window_plan};
use sidefit::math::Interpolant;

fn opts() -> SearchOptions {
    SearchOptions {
        window_half_width: 100,
        samples_per_window: 2000,
        refine: true,
    }
}

/// Observations equal to the model except `(0.0, 0.5)` at the jump.
fn midpoint_observations() -> (Vec<f64>, Vec<f64>) {
    let (x, mut y) = step_curve();
    y[STEP_INDEX] = 0.5;
    (x, y)
}

fn residual_at_jump(model_y: &[f64], kind: InterpKind) -> f64 {
    let (mx, _) = step_curve();
    let (px, py) = midpoint_observations();
    let f = Interpolant::new(&mx, model_y, kind).unwrap();
    let r = nearest_distances(&mx, &f, &px, &py, &opts()).unwrap();
    assert_eq!(r.len(), px.len());
    r[STEP_INDEX]
}

#[test]
fn demo_residuals_are_finite_and_non_negative() {
    let sample = demo_sample(&SampleConfig {
        noise_sigma: 0.05,
        seed: 7,
    })
    .unwrap();
    let mut fitter = Fitter::new(sample.model, sample.points);
    fitter.interpolate(InterpKind::Linear);
    let r = fitter.brute_force(&opts()).unwrap();

    assert_eq!(r.len(), STEP_SAMPLES);
    assert!(r.iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn true_discontinuity_leaves_half_unit_gap() {
    let (_, y) = step_curve();
    let r = residual_at_jump(&y, InterpKind::Previous);
    assert_abs_diff_eq!(r, 0.5, epsilon = 1e-3);
}

#[test]
fn linear_step_is_crossed_by_its_connecting_segment() {
    let (_, y) = step_curve();
    let r = residual_at_jump(&y, InterpKind::Linear);
    assert!(r <= 0.5);
    assert!(r < 0.01, "linear jump segment passes near (0, 0.5), got {r}");
}

#[test]
fn smoothed_model_passes_closer_than_hard_step() {
    let (_, hard) = step_curve();
    let (_, smooth) = sigmoid_smoothed();
    let hard_r = residual_at_jump(&hard, InterpKind::Previous);
    let smooth_r = residual_at_jump(&smooth, InterpKind::Linear);
    assert!(smooth_r < hard_r);
    assert_abs_diff_eq!(smooth_r, 0.0, epsilon = 1e-6);
}

#[test]
fn points_on_model_samples_have_zero_residual() {
    let (x, y) = sigmoid_smoothed();
    let mut fitter = Fitter::from_slices(&x, &y, &x, &y).unwrap();
    fitter.interpolate(InterpKind::Linear);
    let r = fitter.brute_force(&opts()).unwrap();
    for v in r {
        assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn first_point_searches_fewer_samples_than_interior() {
    let base = opts().samples_per_window;
    let first = window_plan(0, STEP_SAMPLES, 100, base);
    let middle = window_plan(STEP_INDEX, STEP_SAMPLES, 100, base);
    assert!(first.samples < base);
    assert_eq!(middle.samples, base);
}

#[test]
fn cubic_and_linear_agree_away_from_the_jump() {
    let (x, y) = sigmoid_smoothed();
    let (px, py) = (x.clone(), y.clone());
    let lin = Interpolant::new(&x, &y, InterpKind::Linear).unwrap();
    let cub = Interpolant::new(&x, &y, InterpKind::Cubic).unwrap();
    let rl = nearest_distances(&x, &lin, &px, &py, &opts()).unwrap();
    let rc = nearest_distances(&x, &cub, &px, &py, &opts()).unwrap();
    assert_abs_diff_eq!(rl[200], rc[200], epsilon = 1e-9);
    assert_abs_diff_eq!(rl[1800], rc[1800], epsilon = 1e-9);
}
