//! Windowed brute-force nearest-point search.
//!
//! For each observation `(px, py)` we minimise the distance
//!
//! ```text
//! r(x) = sqrt((x - px)^2 + (f(x) - py)^2)
//! ```
//!
//! (computed with `hypot`, so large offsets do not overflow) over a window
//! of the model domain centred on the point's aligned index.
//! The minimum is found by evaluating `r` on an evenly spaced grid rather
//! than with a gradient method: near steps `r` is non-convex or even
//! discontinuous and local optimizers stall on the wrong branch.
//!
//! Each point is independent, so points are searched in parallel and the
//! output keeps input order.

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::domain::types::{check_finite, check_increasing};
use crate::domain::{PointOutcome, SearchOptions};
use crate::error::SidefitError;
use crate::fit::window::{Window, resolve_window, window_plan};
use crate::math::Interpolant;

/// Golden-section iterations used to polish a grid minimum.
const REFINE_ITERS: usize = 60;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Progress callback that does nothing.
pub fn no_progress() {}

/// Minimum distance from each point to the interpolated curve.
///
/// The result has one finite, non-negative entry per point.
pub fn nearest_distances(
    curve_x: &[f64],
    interp: &Interpolant,
    points_x: &[f64],
    points_y: &[f64],
    opts: &SearchOptions,
) -> Result<Vec<f64>, SidefitError> {
    nearest_distances_with_progress(curve_x, interp, points_x, points_y, opts, &no_progress)
}

/// Like [`nearest_distances`], calling `progress` once per finished point.
pub fn nearest_distances_with_progress(
    curve_x: &[f64],
    interp: &Interpolant,
    points_x: &[f64],
    points_y: &[f64],
    opts: &SearchOptions,
    progress: &(dyn Fn() + Sync),
) -> Result<Vec<f64>, SidefitError> {
    let outcomes = search_points(curve_x, interp, points_x, points_y, opts, progress)?;
    Ok(outcomes.iter().map(PointOutcome::distance).collect())
}

/// Search every point and return the tagged per-point outcome.
///
/// All preconditions are checked before any work starts; on error no
/// partial result is produced.
#[instrument(skip_all, fields(points = points_x.len(), curve = curve_x.len()))]
pub fn search_points(
    curve_x: &[f64],
    interp: &Interpolant,
    points_x: &[f64],
    points_y: &[f64],
    opts: &SearchOptions,
    progress: &(dyn Fn() + Sync),
) -> Result<Vec<PointOutcome>, SidefitError> {
    validate_inputs(curve_x, points_x, points_y, opts)?;

    debug!(
        half_width = opts.window_half_width,
        samples = opts.samples_per_window,
        refine = opts.refine,
        "starting nearest-point search"
    );

    let outcomes = (0..points_x.len())
        .into_par_iter()
        .map(|i| {
            let outcome = search_one(i, curve_x, interp, points_x[i], points_y[i], opts);
            progress();
            outcome
        })
        .collect::<Result<Vec<_>, _>>()?;

    let fallbacks = outcomes.iter().filter(|o| o.is_fallback()).count();
    if fallbacks > 0 {
        warn!(fallbacks, "degenerate windows; used vertical offset for those points");
    }

    Ok(outcomes)
}

fn validate_inputs(
    curve_x: &[f64],
    points_x: &[f64],
    points_y: &[f64],
    opts: &SearchOptions,
) -> Result<(), SidefitError> {
    opts.validate()?;
    if points_x.len() != points_y.len() {
        return Err(SidefitError::LengthMismatch {
            what: "points x/y",
            left: points_x.len(),
            right: points_y.len(),
        });
    }
    if curve_x.len() < 2 {
        return Err(SidefitError::TooFewSamples {
            got: curve_x.len(),
            min: 2,
        });
    }
    check_finite("model x", curve_x)?;
    check_increasing(curve_x)?;
    check_finite("points x", points_x)?;
    check_finite("points y", points_y)?;
    if opts.window_half_width.saturating_mul(2) >= curve_x.len() {
        return Err(SidefitError::WindowTooWide {
            half_width: opts.window_half_width,
            curve_len: curve_x.len(),
        });
    }
    if points_x.len() > curve_x.len() {
        return Err(SidefitError::PointsExceedCurve {
            points: points_x.len(),
            curve_len: curve_x.len(),
        });
    }
    Ok(())
}

fn search_one(
    index: usize,
    curve_x: &[f64],
    interp: &Interpolant,
    px: f64,
    py: f64,
    opts: &SearchOptions,
) -> Result<PointOutcome, SidefitError> {
    let plan = window_plan(
        index,
        curve_x.len(),
        opts.window_half_width,
        opts.samples_per_window,
    );

    match resolve_window(&plan, curve_x) {
        Window::Feasible { lower, upper, samples } => {
            let r = |x: f64| -> Result<f64, SidefitError> {
                let dy = interp.evaluate(x)? - py;
                Ok((x - px).hypot(dy))
            };

            let best = grid_minimum(&r, lower, upper, samples)?;
            let best = if opts.refine {
                refine_minimum(&r, best, lower, upper)?
            } else {
                best
            };

            Ok(PointOutcome::Searched {
                distance: finite_distance(best.fval, index)?,
                x0: best.x0,
                samples,
            })
        }
        Window::Degenerate => {
            let y = interp.evaluate(px)?;
            Ok(PointOutcome::Fallback {
                distance: finite_distance((py - y).abs(), index)?,
            })
        }
    }
}

/// `f(x) - py` can exceed `f64::MAX` even when both terms are finite.
fn finite_distance(distance: f64, index: usize) -> Result<f64, SidefitError> {
    if distance.is_finite() {
        Ok(distance)
    } else {
        Err(SidefitError::NonFinite {
            what: "residual",
            index,
        })
    }
}

/// Location and value of the best objective evaluation so far.
#[derive(Debug, Clone, Copy)]
struct GridMin {
    x0: f64,
    fval: f64,
    /// Grid spacing, used to bracket the refinement.
    step: f64,
}

/// Evaluate `r` at `samples` evenly spaced points across `[lower, upper]`.
///
/// Both ends are included. Ties keep the first (left-most) minimiser.
fn grid_minimum<F>(r: &F, lower: f64, upper: f64, samples: usize) -> Result<GridMin, SidefitError>
where
    F: Fn(f64) -> Result<f64, SidefitError>,
{
    let step = (upper - lower) / (samples - 1) as f64;
    let mut best = GridMin {
        x0: lower,
        fval: r(lower)?,
        step,
    };

    for k in 1..samples {
        // Pin the last sample so rounding never steps outside the domain.
        let x = if k == samples - 1 {
            upper
        } else {
            (lower + step * k as f64).min(upper)
        };
        let fval = r(x)?;
        if fval < best.fval {
            best.x0 = x;
            best.fval = fval;
        }
    }

    Ok(best)
}

/// Golden-section polish within one grid step either side of the grid minimum.
///
/// The bracket is clamped to the window. The polished point only replaces
/// the grid minimum when it is strictly better, so refinement never makes a
/// residual worse even where `r` is discontinuous.
fn refine_minimum<F>(r: &F, grid: GridMin, lower: f64, upper: f64) -> Result<GridMin, SidefitError>
where
    F: Fn(f64) -> Result<f64, SidefitError>,
{
    let mut a = (grid.x0 - grid.step).max(lower);
    let mut b = (grid.x0 + grid.step).min(upper);
    let mut best = grid;

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = r(c)?;
    let mut fd = r(d)?;

    for _ in 0..REFINE_ITERS {
        if b - a <= f64::EPSILON * (1.0 + a.abs().max(b.abs())) {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = r(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = r(d)?;
        }
    }

    for (x, f) in [(c, fc), (d, fd)] {
        if f < best.fval {
            best.x0 = x;
            best.fval = f;
        }
    }
    Ok(best)
}
