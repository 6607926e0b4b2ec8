//! PID controller with a feedforward term
//!
//! Plain discrete PID on a caller-supplied error. No integral clamping and no
//! output saturation; the actuator clamps whatever command it receives.

use serde::{Deserialize, Serialize};
use simcore::Model;

/// Controller gains
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain
    pub p: f64,
    /// Integral gain
    #[serde(default)]
    pub i: f64,
    /// Derivative gain
    #[serde(default)]
    pub d: f64,
    /// Feedforward gain
    #[serde(default)]
    pub f: f64,
}

impl PidGains {
    /// Create a P-only controller
    pub fn p(p: f64) -> Self {
        Self { p, ..Default::default() }
    }

    /// Create a PI controller
    pub fn pi(p: f64, i: f64) -> Self {
        Self { p, i, ..Default::default() }
    }

    /// Create a PID controller
    pub fn pid(p: f64, i: f64, d: f64) -> Self {
        Self { p, i, d, ..Default::default() }
    }

    /// Create a PID controller with feedforward
    pub fn pidf(p: f64, i: f64, d: f64, f: f64) -> Self {
        Self { p, i, d, f }
    }
}

/// How the error difference is turned into the derivative term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DerivativeScaling {
    /// `(error - previous) / dt`, the finite-difference rate.
    #[default]
    Rate,
    /// `(error - previous) * dt`, as older tuning runs computed it.
    /// Only useful to reproduce results from those runs.
    LegacyProduct,
}

#[derive(Debug, Clone)]
pub struct Pid {
    gains: PidGains,
    scaling: DerivativeScaling,
    integral: f64,
    previous_error: f64,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            scaling: DerivativeScaling::default(),
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    pub fn with_derivative_scaling(mut self, scaling: DerivativeScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Feed one error sample and return the controller output.
    ///
    /// `dt` must be non-zero.
    pub fn push_error(&mut self, error: f64, dt: f64) -> f64 {
        self.push_error_with_feedforward(error, dt, 0.0)
    }

    /// Like [`Pid::push_error`], adding `f * feedforward` to the output.
    pub fn push_error_with_feedforward(&mut self, error: f64, dt: f64, feedforward: f64) -> f64 {
        let delta = error - self.previous_error;
        let derivative = match self.scaling {
            DerivativeScaling::Rate => delta / dt,
            DerivativeScaling::LegacyProduct => delta * dt,
        };
        self.integral += error * dt;
        self.previous_error = error;

        self.gains.p * error
            + self.gains.i * self.integral
            + self.gains.d * derivative
            + self.gains.f * feedforward
    }

    /// Get the current integral accumulator value
    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn derivative_scaling(&self) -> DerivativeScaling {
        self.scaling
    }

    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }
}

impl Model for Pid {
    fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }
}
