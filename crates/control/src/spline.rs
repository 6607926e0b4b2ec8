//! Cubic Hermite spline sampled by fractional index, and a generic
//! central-difference derivative.

use simcore::SimError;

/// Step used by [`derivative_of`] when the caller has no better choice.
pub const DEFAULT_DERIVATIVE_STEP: f64 = 0.001;

/// Piecewise cubic through ordered control points with per-point tangents.
///
/// Point `k` sits at index `k`; the curve is flat outside `[0, len - 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteSpline {
    points: Vec<f64>,
    tangents: Vec<f64>,
}

impl HermiteSpline {
    /// Spline through `points` with zero tangents.
    pub fn new(points: Vec<f64>) -> Result<Self, SimError> {
        let tangents = vec![0.0; points.len()];
        Self::with_tangents(points, tangents)
    }

    pub fn with_tangents(points: Vec<f64>, tangents: Vec<f64>) -> Result<Self, SimError> {
        if points.is_empty() {
            return Err(SimError::EmptyTrajectory);
        }
        if points.len() != tangents.len() {
            return Err(SimError::TangentCountMismatch {
                points: points.len(),
                tangents: tangents.len(),
            });
        }
        Ok(Self { points, tangents })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn tangents(&self) -> &[f64] {
        &self.tangents
    }

    /// Number of segments between control points.
    pub fn segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Value of the curve at fractional index `x`. NaN in, NaN out.
    pub fn sample(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let last = self.points.len() - 1;
        if x < 0.0 {
            return self.points[0];
        }
        let i0 = x.floor();
        if i0 >= last as f64 {
            return self.points[last];
        }
        let i0 = i0 as usize;
        let i1 = i0 + 1;

        let t = x - i0 as f64;
        let t2 = t * t;
        let t3 = t2 * t;

        // Hermite basis
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.points[i0] + h10 * self.tangents[i0] + h01 * self.points[i1] + h11 * self.tangents[i1]
    }
}

/// `(f(x + h) - f(x - h)) / 2h`
pub fn central_difference<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Wrap `f` into its numerical derivative with step `h`.
pub fn derivative_of<F>(f: F, h: f64) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |x| central_difference(&f, x, h)
}
