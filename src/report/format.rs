//! Formatted terminal output.
//!
//! Kept apart from the search code so output changes stay local.

use crate::domain::{InterpKind, PointOutcome, SearchOptions};
use crate::report::ResidualSummary;

/// Format the run summary block.
pub fn format_summary(summary: &ResidualSummary, kind: InterpKind, opts: &SearchOptions) -> String {
    let mut out = String::new();

    out.push_str("=== sidefit - nearest-point residuals ===\n");
    out.push_str(&format!(
        "Interpolation: {kind} | half-width={} | samples/window={} | refine={}\n",
        opts.window_half_width, opts.samples_per_window, opts.refine
    ));
    out.push_str(&format!(
        "Points: n={} | fallback={}\n",
        summary.n, summary.fallback_count
    ));
    out.push_str(&format!(
        "Residual: min={:.6} max={:.6} mean={:.6} rms={:.6}\n",
        summary.min, summary.max, summary.mean, summary.rms
    ));

    out
}

/// Format the `top` largest residuals as a table.
pub fn format_largest(outcomes: &[PointOutcome], points_x: &[f64], points_y: &[f64], top: usize) -> String {
    let mut order: Vec<usize> = (0..outcomes.len()).collect();
    order.sort_by(|&a, &b| {
        outcomes[b]
            .distance()
            .partial_cmp(&outcomes[a].distance())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str(&format!(
        "{:>8} {:>12} {:>12} {:>12} {:>12}\n",
        "index", "px", "py", "residual", "x0"
    ));
    out.push_str(&format!(
        "{:-<8} {:-<12} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", ""
    ));

    for &i in order.iter().take(top) {
        let o = &outcomes[i];
        out.push_str(
            format!(
                "{:>8} {:>12.6} {:>12.6} {:>12.6} {:>12}\n",
                i,
                points_x[i],
                points_y[i],
                o.distance(),
                fmt_opt(o.x0()),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::summarize;

    #[test]
    fn summary_mentions_configuration() {
        let outcomes = [PointOutcome::Searched { distance: 0.25, x0: 1.0, samples: 4 }];
        let text = format_summary(&summarize(&outcomes), InterpKind::Linear, &SearchOptions::default());
        assert!(text.contains("linear"));
        assert!(text.contains("half-width=100"));
        assert!(text.contains("n=1"));
    }

    #[test]
    fn largest_residuals_come_first() {
        let outcomes = [
            PointOutcome::Searched { distance: 0.1, x0: 0.0, samples: 4 },
            PointOutcome::Fallback { distance: 0.9 },
            PointOutcome::Searched { distance: 0.5, x0: 2.0, samples: 4 },
        ];
        let text = format_largest(&outcomes, &[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0], 2);
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].trim_start().starts_with('1'));
        assert!(rows[0].ends_with('-'));
        assert!(rows[1].trim_start().starts_with('2'));
    }
}
