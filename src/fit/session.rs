//! A fitting session: one model curve, one set of observations.
//!
//! The session owns its inputs for its whole lifetime, builds the
//! interpolant on first use and keeps the most recent search result. Each
//! search replaces the previous result entirely.

use tracing::debug;

use crate::domain::{InterpKind, ModelCurve, ObservationSet, PointOutcome, SearchOptions};
use crate::error::SidefitError;
use crate::fit::search::{no_progress, search_points};
use crate::math::Interpolant;

#[derive(Debug, Clone)]
pub struct Fitter {
    curve: ModelCurve,
    points: ObservationSet,
    interp: Option<Interpolant>,
    outcomes: Option<Vec<PointOutcome>>,
    residuals: Option<Vec<f64>>,
}

impl Fitter {
    pub fn new(curve: ModelCurve, points: ObservationSet) -> Self {
        Self {
            curve,
            points,
            interp: None,
            outcomes: None,
            residuals: None,
        }
    }

    /// Convenience constructor from raw sequences.
    pub fn from_slices(x: &[f64], y: &[f64], points_x: &[f64], points_y: &[f64]) -> Result<Self, SidefitError> {
        let curve = ModelCurve::new(x.to_vec(), y.to_vec())?;
        let points = ObservationSet::new(points_x.to_vec(), points_y.to_vec())?;
        Ok(Self::new(curve, points))
    }

    pub fn curve(&self) -> &ModelCurve {
        &self.curve
    }

    pub fn points(&self) -> &ObservationSet {
        &self.points
    }

    /// Build (or reuse) the interpolant of the given kind.
    ///
    /// The interpolant is rebuilt only when `kind` differs from the cached one.
    pub fn interpolate(&mut self, kind: InterpKind) -> &Interpolant {
        if !matches!(&self.interp, Some(f) if f.kind() == kind) {
            debug!(%kind, samples = self.curve.len(), "building interpolant");
            self.interp = Some(Interpolant::from_curve(&self.curve, kind));
        }
        self.interp.as_ref().expect("interpolant just ensured")
    }

    pub fn interpolant(&self) -> Option<&Interpolant> {
        self.interp.as_ref()
    }

    /// Run the nearest-point search and return the residual vector.
    ///
    /// Uses the cached interpolant, building a linear one if none exists yet.
    pub fn brute_force(&mut self, opts: &SearchOptions) -> Result<&[f64], SidefitError> {
        self.brute_force_with_progress(opts, &no_progress)
    }

    pub fn brute_force_with_progress(
        &mut self,
        opts: &SearchOptions,
        progress: &(dyn Fn() + Sync),
    ) -> Result<&[f64], SidefitError> {
        let curve = &self.curve;
        let interp = self.interp.get_or_insert_with(|| {
            debug!(kind = %InterpKind::default(), samples = curve.len(), "building interpolant");
            Interpolant::from_curve(curve, InterpKind::default())
        });

        let outcomes = search_points(
            self.curve.x(),
            interp,
            self.points.x(),
            self.points.y(),
            opts,
            progress,
        )?;
        let residuals: Vec<f64> = outcomes.iter().map(PointOutcome::distance).collect();

        self.outcomes = Some(outcomes);
        let stored = self.residuals.insert(residuals);
        Ok(stored.as_slice())
    }

    /// Residuals from the latest search, if any.
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    /// Per-point outcomes from the latest search, if any.
    pub fn outcomes(&self) -> Option<&[PointOutcome]> {
        self.outcomes.as_deref()
    }
}
