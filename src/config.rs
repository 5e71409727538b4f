//! Environment-provided defaults.
//!
//! A `.env` file (or the process environment) may override the built-in
//! search defaults; explicit CLI flags override both.
//!
//! | variable             | meaning                        |
//! |----------------------|--------------------------------|
//! | `SIDEFIT_KIND`       | interpolation kind             |
//! | `SIDEFIT_HALF_WIDTH` | window half-width (samples)    |
//! | `SIDEFIT_SAMPLES`    | samples per full window        |
//! | `SIDEFIT_REFINE`     | `true`/`false`                 |

use crate::domain::{InterpKind, SearchOptions};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvDefaults {
    pub kind: InterpKind,
    pub search: SearchOptions,
}

impl EnvDefaults {
    /// Load `.env` if present, then read overrides from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build defaults from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut out = Self::default();

        if let Some(raw) = get("SIDEFIT_KIND") {
            out.kind = raw
                .parse()
                .map_err(|e| AppError::new(2, format!("SIDEFIT_KIND: {e}")))?;
        }
        if let Some(raw) = get("SIDEFIT_HALF_WIDTH") {
            out.search.window_half_width = parse_count("SIDEFIT_HALF_WIDTH", &raw)?;
        }
        if let Some(raw) = get("SIDEFIT_SAMPLES") {
            out.search.samples_per_window = parse_count("SIDEFIT_SAMPLES", &raw)?;
        }
        if let Some(raw) = get("SIDEFIT_REFINE") {
            out.search.refine = raw
                .trim()
                .parse()
                .map_err(|_| AppError::new(2, format!("SIDEFIT_REFINE: expected true/false, got '{raw}'")))?;
        }

        Ok(out)
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::new(2, format!("{key}: expected a positive integer, got '{raw}'"))),
    }
}
