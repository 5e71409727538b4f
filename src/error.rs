//! Error types.
//!
//! The library surfaces [`SidefitError`]; the binary converts it into an
//! [`AppError`] that carries a process exit code:
//!
//! - `2`: bad input or configuration
//! - `3`: no usable data
//! - `4`: numerical failure

use thiserror::Error;

/// Errors produced by interpolation, validation and the nearest-point search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SidefitError {
    /// The interpolant was evaluated outside the model's x-range.
    #[error("x={x} is outside the model domain [{min}, {max}]")]
    Domain { x: f64, min: f64, max: f64 },

    #[error("length mismatch for {what}: {left} vs {right}")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("need at least {min} samples, got {got}")]
    TooFewSamples { got: usize, min: usize },

    /// `x[index]` is not strictly greater than `x[index - 1]`.
    #[error("model x must be strictly increasing (violated at index {index})")]
    NotIncreasing { index: usize },

    #[error("non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("window half-width {half_width} is too wide for a curve of {curve_len} samples (need 2*h < n)")]
    WindowTooWide { half_width: usize, curve_len: usize },

    /// Point `i` is searched around `curve_x[i]`, so there can't be more points than samples.
    #[error("{points} observation points but only {curve_len} model samples to align them with")]
    PointsExceedCurve { points: usize, curve_len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SidefitError {
    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            SidefitError::Domain { .. } => 4,
            SidefitError::TooFewSamples { .. } => 3,
            _ => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SidefitError> for AppError {
    fn from(err: SidefitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_exit_codes() {
        let err: AppError = SidefitError::Domain { x: 2.0, min: 0.0, max: 1.0 }.into();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("outside the model domain"));

        let err: AppError = SidefitError::NotIncreasing { index: 3 }.into();
        assert_eq!(err.exit_code(), 2);
    }
}
