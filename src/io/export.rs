//! Export per-point results to CSV and the run report to JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{ObservationSet, PointOutcome};
use crate::error::AppError;
use crate::report::RunReport;

/// Write per-point results to a CSV file.
pub fn write_residuals_csv(path: &Path, points: &ObservationSet, outcomes: &[PointOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_residuals(file, points, outcomes)
}

/// Write per-point results as CSV to any sink.
pub fn write_residuals<W: Write>(mut out: W, points: &ObservationSet, outcomes: &[PointOutcome]) -> Result<(), AppError> {
    writeln!(out, "index,px,py,residual,x0,fallback")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, o) in outcomes.iter().enumerate() {
        writeln!(
            out,
            "{},{:.10},{:.10},{:.10},{},{}",
            i,
            points.x()[i],
            points.y()[i],
            o.distance(),
            o.x0().map(|v| format!("{v:.10}")).unwrap_or_default(),
            o.is_fallback(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the run report as pretty JSON.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_one_row_per_point() {
        let points = ObservationSet::new(vec![0.0, 1.0], vec![0.5, 0.5]).unwrap();
        let outcomes = [
            PointOutcome::Fallback { distance: 0.5 },
            PointOutcome::Searched { distance: 0.25, x0: 1.5, samples: 8 },
        ];
        let mut buf = Vec::new();
        write_residuals(&mut buf, &points, &outcomes).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,px,py,residual,x0,fallback");
        assert!(lines[1].ends_with(",,true"));
        assert!(lines[2].starts_with("1,1.0000000000,0.5000000000,0.2500000000,1.5000000000"));
    }
}
