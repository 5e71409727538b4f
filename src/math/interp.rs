//! One-dimensional interpolation of the model samples.
//!
//! The search treats the interpolant as a black box: "give me y at any x
//! inside the sampled range". Outside that range evaluation fails with
//! `SidefitError::Domain` instead of extrapolating.

use crate::domain::{InterpKind, ModelCurve};
use crate::error::SidefitError;
use crate::math::spline::{eval_segment, natural_second_derivatives};

/// A continuous curve built once from the model samples.
///
/// Immutable after construction and shared by reference across the search
/// workers.
#[derive(Debug, Clone)]
pub struct Interpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
    rule: SegmentRule,
}

/// Per-segment evaluation rule, carrying whatever the kind precomputes.
#[derive(Debug, Clone)]
enum SegmentRule {
    Linear,
    Nearest,
    Previous,
    Next,
    /// Knot second derivatives of the natural spline.
    Cubic(Vec<f64>),
}

impl Interpolant {
    /// Validate the samples and build the interpolant.
    pub fn new(x: &[f64], y: &[f64], kind: InterpKind) -> Result<Self, SidefitError> {
        let curve = ModelCurve::new(x.to_vec(), y.to_vec())?;
        Ok(Self::from_curve(&curve, kind))
    }

    /// Build from an already validated curve.
    pub fn from_curve(curve: &ModelCurve, kind: InterpKind) -> Self {
        let xs = curve.x().to_vec();
        let ys = curve.y().to_vec();
        let rule = match kind {
            InterpKind::Linear => SegmentRule::Linear,
            InterpKind::Nearest => SegmentRule::Nearest,
            InterpKind::Previous => SegmentRule::Previous,
            InterpKind::Next => SegmentRule::Next,
            InterpKind::Cubic => SegmentRule::Cubic(natural_second_derivatives(&xs, &ys)),
        };
        Self { xs, ys, rule }
    }

    pub fn kind(&self) -> InterpKind {
        match self.rule {
            SegmentRule::Linear => InterpKind::Linear,
            SegmentRule::Nearest => InterpKind::Nearest,
            SegmentRule::Previous => InterpKind::Previous,
            SegmentRule::Next => InterpKind::Next,
            SegmentRule::Cubic(_) => InterpKind::Cubic,
        }
    }

    /// Closed x-range on which the interpolant is defined.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate `y(x)`.
    pub fn evaluate(&self, x: f64) -> Result<f64, SidefitError> {
        let (min, max) = self.domain();
        // Written so that NaN also fails the check.
        if !(x >= min && x <= max) {
            return Err(SidefitError::Domain { x, min, max });
        }

        let idx = self.xs.partition_point(|&v| v < x);
        if self.xs[idx] == x {
            return Ok(self.ys[idx]);
        }
        // x > xs[0] here, so idx >= 1.
        let lo = idx - 1;
        let hi = idx;

        let y = match &self.rule {
            SegmentRule::Linear => {
                let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
                self.ys[lo] + t * (self.ys[hi] - self.ys[lo])
            }
            SegmentRule::Nearest => {
                if x - self.xs[lo] <= self.xs[hi] - x {
                    self.ys[lo]
                } else {
                    self.ys[hi]
                }
            }
            SegmentRule::Previous => self.ys[lo],
            SegmentRule::Next => self.ys[hi],
            SegmentRule::Cubic(y2s) => eval_segment(&self.xs, &self.ys, y2s, lo, x),
        };
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(kind: InterpKind) -> Interpolant {
        Interpolant::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 20.0], kind).unwrap()
    }

    #[test]
    fn linear_interpolates_between_samples() {
        let f = ramp(InterpKind::Linear);
        assert!((f.evaluate(0.5).unwrap() - 5.0).abs() < 1e-12);
        assert!((f.evaluate(1.5).unwrap() - 15.0).abs() < 1e-12);
        assert_eq!(f.evaluate(2.0).unwrap(), 20.0);
    }

    #[test]
    fn step_kinds_pick_the_expected_neighbour() {
        assert_eq!(ramp(InterpKind::Previous).evaluate(0.9).unwrap(), 0.0);
        assert_eq!(ramp(InterpKind::Next).evaluate(0.1).unwrap(), 10.0);
        assert_eq!(ramp(InterpKind::Nearest).evaluate(0.4).unwrap(), 0.0);
        assert_eq!(ramp(InterpKind::Nearest).evaluate(0.6).unwrap(), 10.0);
        // Exact sample hits are the sample value for every kind.
        assert_eq!(ramp(InterpKind::Previous).evaluate(1.0).unwrap(), 10.0);
    }

    #[test]
    fn cubic_matches_samples() {
        let f = Interpolant::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0], InterpKind::Cubic).unwrap();
        assert!((f.evaluate(2.0).unwrap()).abs() < 1e-12);
        assert!(f.evaluate(1.5).unwrap().is_finite());
    }

    #[test]
    fn evaluation_outside_domain_fails() {
        let f = ramp(InterpKind::Linear);
        assert_eq!(
            f.evaluate(2.5),
            Err(SidefitError::Domain { x: 2.5, min: 0.0, max: 2.0 })
        );
        assert!(f.evaluate(-1e-9).is_err());
        assert!(f.evaluate(f64::NAN).is_err());
    }

    #[test]
    fn kind_round_trips_through_construction() {
        for kind in [
            InterpKind::Linear,
            InterpKind::Nearest,
            InterpKind::Previous,
            InterpKind::Next,
            InterpKind::Cubic,
        ] {
            assert_eq!(ramp(kind).kind(), kind);
        }
    }

    #[test]
    fn construction_validates_samples() {
        assert!(Interpolant::new(&[0.0, 0.0], &[1.0, 2.0], InterpKind::Linear).is_err());
        assert!(Interpolant::new(&[0.0], &[1.0], InterpKind::Linear).is_err());
    }
}
