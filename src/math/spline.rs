//! Natural cubic spline coefficients.
//!
//! A natural spline has continuous first and second derivatives at every knot
//! and zero curvature at both ends. We store the second derivative at each
//! knot; evaluation on a bracketing segment then only needs the two
//! neighbouring knots.

/// Solve the tridiagonal system for the knot second derivatives.
///
/// `xs` must be strictly increasing and the same length as `ys` (at least 2).
pub fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    if n < 3 {
        return y2s;
    }
    let mut u = vec![0.0; n - 1];

    // Forward sweep.
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    // Back substitution; the natural end condition keeps y2s[n - 1] = 0.
    for k in (0..n - 2).rev() {
        y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
    }

    y2s
}

/// Evaluate the spline on the segment `[lo, lo + 1]`.
pub fn eval_segment(xs: &[f64], ys: &[f64], y2s: &[f64], lo: usize, x: f64) -> f64 {
    let hi = lo + 1;
    let h = xs[hi] - xs[lo];
    let a = (xs[hi] - x) / h;
    let b = (x - xs[lo]) / h;

    a * ys[lo] + b * ys[hi] + ((a * a * a - a) * y2s[lo] + (b * b * b - b) * y2s[hi]) * h * h / 6.0
}
