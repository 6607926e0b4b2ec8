use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Default physics timestep (1 kHz).
pub const DEFAULT_PHYSICS_STEP: f64 = 0.001;
/// Default control-loop frequency in Hz.
pub const DEFAULT_CONTROL_FREQUENCY: f64 = 50.0;

/// Slack when converting `duration / physics_step` to a tick count, so that
/// e.g. `20.0 / 0.01` lands on 2000 despite binary rounding.
const TICK_TOLERANCE: f64 = 1e-6;

const fn default_physics_step() -> f64 {
    DEFAULT_PHYSICS_STEP
}

const fn default_control_frequency() -> f64 {
    DEFAULT_CONTROL_FREQUENCY
}

/// Timing configuration for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Simulated time span in seconds.
    pub duration: f64,
    /// Physics timestep in seconds.
    #[serde(default = "default_physics_step")]
    pub physics_step: f64,
    /// Rate at which the control law runs, in Hz.
    #[serde(default = "default_control_frequency")]
    pub control_frequency: f64,
}

impl SimConfig {
    /// Configuration with default physics step and control frequency.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            physics_step: DEFAULT_PHYSICS_STEP,
            control_frequency: DEFAULT_CONTROL_FREQUENCY,
        }
    }

    pub fn with_physics_step(mut self, physics_step: f64) -> Self {
        self.physics_step = physics_step;
        self
    }

    pub fn with_control_frequency(mut self, control_frequency: f64) -> Self {
        self.control_frequency = control_frequency;
        self
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.physics_step.is_finite() && self.physics_step > 0.0) {
            return Err(SimError::InvalidPhysicsStep(self.physics_step));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(SimError::InvalidDuration(self.duration));
        }
        if !(self.control_frequency.is_finite() && self.control_frequency > 0.0) {
            return Err(SimError::InvalidControlFrequency(self.control_frequency));
        }
        if self.ticks_per_control_raw().round() < 1.0 {
            return Err(SimError::ControlPeriodTooShort {
                frequency: self.control_frequency,
                physics_step: self.physics_step,
            });
        }
        Ok(())
    }

    fn ticks_per_control_raw(&self) -> f64 {
        1.0 / (self.control_frequency * self.physics_step)
    }

    /// Physics ticks between consecutive control-loop invocations.
    ///
    /// Only meaningful on a validated config, where it is at least 1.
    pub fn control_period_ticks(&self) -> usize {
        self.ticks_per_control_raw().round().max(1.0) as usize
    }

    /// Whether the control frequency divides the physics rate exactly.
    pub fn control_period_is_exact(&self) -> bool {
        let raw = self.ticks_per_control_raw();
        (raw - raw.round()).abs() <= TICK_TOLERANCE
    }

    /// Timestep handed to the control law.
    pub fn control_step(&self) -> f64 {
        self.physics_step * self.control_period_ticks() as f64
    }

    /// Number of physics ticks in a run, including tick 0.
    pub fn tick_count(&self) -> usize {
        (self.duration / self.physics_step + TICK_TOLERANCE).floor() as usize + 1
    }

    /// Simulated time at physics tick `tick`.
    pub fn time_at(&self, tick: usize) -> f64 {
        tick as f64 * self.physics_step
    }
}
