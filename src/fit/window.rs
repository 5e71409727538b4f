//! Search window selection.
//!
//! Point `i` is searched between `curve_x[i - h]` and `curve_x[i + h]`, where
//! `h` is the window half-width. Near either end of the model the window is
//! truncated at the first/last sample, and the number of objective
//! evaluations shrinks with it so that the grid spacing stays comparable to
//! the interior.
//!
//! Planning is done on indices only, which keeps it a small pure function;
//! [`resolve_window`] then maps the plan onto the model x-values and decides
//! whether the window can actually be searched.

/// Index range and sample budget for one point's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    /// First model index in the window.
    pub lo: usize,
    /// Last model index in the window (inclusive).
    pub hi: usize,
    /// Objective evaluations across `[x[lo], x[hi]]`.
    pub samples: usize,
}

/// A window ready to be searched, or the reason it can't be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    Feasible { lower: f64, upper: f64, samples: usize },
    /// Zero or inverted width, or too few samples for a grid.
    Degenerate,
}

/// Plan the search window for point `index` of a model with `total_len` samples.
///
/// - interior (`h <= index <= n - h - 1`): `[index - h, index + h]`, `base_count` samples
/// - left edge (`index < h`): `[0, index + h]`
/// - right edge (`index > n - h - 1`): `[index - h, n - 1]`
///
/// At the edges the sample count is `base_count` scaled by the fraction of
/// the full `2h` window that survives truncation, rounded up. Both edges use
/// this rule, so the last point gets `base_count / 2` rather than the
/// `base_count * (n - i) / h` a one-sided ratio would give.
///
/// Callers guarantee `2 * half_width < total_len` and `index < total_len`;
/// the search validates both before planning.
pub fn window_plan(index: usize, total_len: usize, half_width: usize, base_count: usize) -> WindowPlan {
    debug_assert!(half_width > 0 && 2 * half_width < total_len);
    debug_assert!(index < total_len);

    let last = total_len - 1;
    let (lo, hi) = if index < half_width {
        (0, index + half_width)
    } else if index + half_width > last {
        (index - half_width, last)
    } else {
        (index - half_width, index + half_width)
    };

    let full = 2 * half_width;
    let span = hi - lo;
    let samples = if span >= full {
        base_count
    } else {
        base_count.saturating_mul(span).div_ceil(full)
    };

    WindowPlan { lo, hi, samples }
}

/// Map a plan onto the model x-values and check that it is searchable.
pub fn resolve_window(plan: &WindowPlan, curve_x: &[f64]) -> Window {
    let lower = curve_x[plan.lo];
    let upper = curve_x[plan.hi];
    if !(lower.is_finite() && upper.is_finite()) || lower >= upper || plan.samples < 2 {
        return Window::Degenerate;
    }
    Window::Feasible {
        lower,
        upper,
        samples: plan.samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_window_is_symmetric_with_full_budget() {
        let plan = window_plan(500, 2000, 100, 10_000);
        assert_eq!(plan, WindowPlan { lo: 400, hi: 600, samples: 10_000 });
    }

    #[test]
    fn first_point_uses_fewer_samples() {
        let plan = window_plan(0, 2000, 100, 10_000);
        assert_eq!(plan.lo, 0);
        assert_eq!(plan.hi, 100);
        assert!(plan.samples < 10_000);
        assert_eq!(plan.samples, 5_000);
    }

    #[test]
    fn right_edge_is_truncated_at_last_sample() {
        let plan = window_plan(1999, 2000, 100, 10_000);
        assert_eq!(plan.lo, 1899);
        assert_eq!(plan.hi, 1999);
        assert_eq!(plan.samples, 5_000);
    }

    #[test]
    fn budget_grows_towards_the_interior() {
        let mut prev = 0;
        for i in 0..=100 {
            let plan = window_plan(i, 2000, 100, 10_000);
            assert!(plan.samples >= prev);
            prev = plan.samples;
        }
        assert_eq!(prev, 10_000);
    }

    #[test]
    fn case_boundaries_match_the_index_rules() {
        // n = 10, h = 2: interior is 2..=7.
        assert_eq!(window_plan(1, 10, 2, 8), WindowPlan { lo: 0, hi: 3, samples: 6 });
        assert_eq!(window_plan(2, 10, 2, 8), WindowPlan { lo: 0, hi: 4, samples: 8 });
        assert_eq!(window_plan(7, 10, 2, 8), WindowPlan { lo: 5, hi: 9, samples: 8 });
        assert_eq!(window_plan(8, 10, 2, 8), WindowPlan { lo: 6, hi: 9, samples: 6 });
    }

    #[test]
    fn huge_budgets_saturate_instead_of_overflowing() {
        let plan = window_plan(0, 2000, 100, usize::MAX);
        assert_eq!(plan.samples, usize::MAX.div_ceil(200));
        assert_eq!(window_plan(500, 2000, 100, usize::MAX).samples, usize::MAX);
    }

    #[test]
    fn tiny_budgets_resolve_to_degenerate() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let plan = window_plan(0, x.len(), 2, 2);
        assert_eq!(plan.samples, 1);
        assert_eq!(resolve_window(&plan, &x), Window::Degenerate);

        let plan = window_plan(2, x.len(), 2, 2);
        assert_eq!(
            resolve_window(&plan, &x),
            Window::Feasible { lower: 0.0, upper: 4.0, samples: 2 }
        );
    }

    #[test]
    fn inverted_bounds_are_degenerate() {
        let plan = WindowPlan { lo: 1, hi: 0, samples: 100 };
        assert_eq!(resolve_window(&plan, &[0.0, 1.0]), Window::Degenerate);
    }
}
