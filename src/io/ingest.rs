//! CSV ingest for `(x, y)` series.
//!
//! Both the model and the observations are read from two-column CSV files.
//! The columns are found by header name (`x`/`y`, or `px`/`py` for points),
//! case-insensitively; other columns are ignored.
//!
//! Rows are never dropped silently: observation `i` is searched around model
//! sample `i`, so losing a row would shift every later point onto the wrong
//! window. Row problems are collected and reported together.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

const X_NAMES: [&str; 2] = ["x", "px"];
const Y_NAMES: [&str; 2] = ["y", "py"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Parsed columns of one CSV file.
#[derive(Debug, Clone)]
pub struct XySeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl XySeries {
    /// Fail unless every row parsed cleanly.
    pub fn require_clean(self, label: &str) -> Result<Self, AppError> {
        if let Some(first) = self.row_errors.first() {
            return Err(AppError::new(
                2,
                format!(
                    "{label}: {} malformed row(s); first at line {}: {}",
                    self.row_errors.len(),
                    first.line,
                    first.message
                ),
            ));
        }
        if self.x.is_empty() {
            return Err(AppError::new(3, format!("{label}: no data rows.")));
        }
        Ok(self)
    }
}

/// Load the `x`/`y` columns of a CSV file.
pub fn load_xy(path: &Path) -> Result<XySeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_xy(file, &path.display().to_string())
}

/// Read `x`/`y` columns from any CSV source.
pub fn read_xy<R: std::io::Read>(source: R, label: &str) -> Result<XySeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("{label}: failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_col = find_column(&header_map, &X_NAMES)
        .ok_or_else(|| AppError::new(2, format!("{label}: missing required column `x`")))?;
    let y_col = find_column(&header_map, &Y_NAMES)
        .ok_or_else(|| AppError::new(2, format!("{label}: missing required column `y`")))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match (parse_field(&record, x_col, "x"), parse_field(&record, y_col, "y")) {
            (Ok(xv), Ok(yv)) => {
                x.push(xv);
                y.push(yv);
            }
            (Err(message), _) | (_, Err(message)) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(XySeries {
        x,
        y,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| header_map.get(*n).copied())
}

fn parse_field(record: &StringRecord, col: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(col)
        .ok_or_else(|| format!("missing `{name}` value"))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid `{name}` value '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("non-finite `{name}` value '{raw}'"));
    }
    Ok(value)
}
