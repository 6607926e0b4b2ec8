//! Motion profiles: targets as functions of simulated time
//!
//! Scenarios read a target and its time derivative (used as the feedforward
//! term) from a `MotionProfile` on every physics tick.

use simcore::SimError;

use crate::spline::{DEFAULT_DERIVATIVE_STEP, central_difference};

pub trait MotionProfile {
    /// Target at time `t` (seconds).
    fn value(&self, t: f64) -> f64;

    /// Rate of change of the target at time `t`.
    ///
    /// Defaults to a central difference of [`MotionProfile::value`].
    fn derivative(&self, t: f64) -> f64 {
        central_difference(|x| self.value(x), t, DEFAULT_DERIVATIVE_STEP)
    }
}

impl<P: MotionProfile + ?Sized> MotionProfile for Box<P> {
    fn value(&self, t: f64) -> f64 {
        (**self).value(t)
    }

    fn derivative(&self, t: f64) -> f64 {
        (**self).derivative(t)
    }
}

/// A fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl MotionProfile for Constant {
    fn value(&self, _t: f64) -> f64 {
        self.0
    }

    fn derivative(&self, _t: f64) -> f64 {
        0.0
    }
}

/// `rate * t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub rate: f64,
}

impl MotionProfile for Ramp {
    fn value(&self, t: f64) -> f64 {
        self.rate * t
    }

    fn derivative(&self, _t: f64) -> f64 {
        self.rate
    }
}

/// Polynomial in `t` with coefficients in ascending powers.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// `scale * (t - r0)(t - r1)...`
    pub fn from_roots(scale: f64, roots: &[f64]) -> Self {
        let mut coefficients = vec![scale];
        for root in roots {
            let mut next = vec![0.0; coefficients.len() + 1];
            for (power, c) in coefficients.iter().enumerate() {
                next[power + 1] += c;
                next[power] -= c * root;
            }
            coefficients = next;
        }
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl MotionProfile for Polynomial {
    fn value(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    fn derivative(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (power, c)| acc * t + c * power as f64)
    }
}

/// Piecewise-constant targets: `values[k]` holds from `times[k]` until the
/// next switch. Before the first switch time the first value holds.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl StepSchedule {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, SimError> {
        if times.len() != values.len() {
            return Err(SimError::ScheduleMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if values.is_empty() {
            return Err(SimError::EmptyTrajectory);
        }
        if let Some(k) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(SimError::UnsortedSchedule(k + 1));
        }
        Ok(Self { times, values })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl MotionProfile for StepSchedule {
    fn value(&self, t: f64) -> f64 {
        let switched = self.times.partition_point(|&switch| switch <= t);
        self.values[switched.saturating_sub(1)]
    }

    fn derivative(&self, _t: f64) -> f64 {
        0.0
    }
}
