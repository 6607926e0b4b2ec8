//! Rigid rotor - a single rotational inertial load (flywheel)
//!
//! Torques and impulses are accumulated between steps and consumed by `step`,
//! which integrates velocity first and then position with the new velocity
//! (semi-implicit Euler).

use log::trace;
use serde::{Deserialize, Serialize};
use simcore::{Model, SimError};

use crate::friction::{FrictionInput, FrictionPolicy};

/// Speed below which the rotor is considered at rest (rad/s).
pub const EPSILON: f64 = 0.001;

/// Physical parameters of a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotorConfig {
    /// Moment of inertia (kg·m²)
    pub mass: f64,
    /// Friction torque opposing motion while moving (N·m)
    #[serde(default)]
    pub kinetic_friction: f64,
    /// Torque that must be exceeded to start moving (N·m)
    #[serde(default)]
    pub static_friction: f64,
    #[serde(default)]
    pub friction_policy: FrictionPolicy,
}

impl RotorConfig {
    /// Frictionless rotor of the given inertia.
    pub fn new(mass: f64) -> Self {
        Self {
            mass,
            kinetic_friction: 0.0,
            static_friction: 0.0,
            friction_policy: FrictionPolicy::default(),
        }
    }

    pub fn with_kinetic_friction(mut self, torque: f64) -> Self {
        self.kinetic_friction = torque;
        self
    }

    pub fn with_static_friction(mut self, torque: f64) -> Self {
        self.static_friction = torque;
        self
    }

    pub fn with_friction_policy(mut self, policy: FrictionPolicy) -> Self {
        self.friction_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        validate_mass(self.mass)?;
        for (kind, value) in [
            ("kinetic", self.kinetic_friction),
            ("static", self.static_friction),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidFriction { kind, value });
            }
        }
        Ok(())
    }
}

fn validate_mass(mass: f64) -> Result<(), SimError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass(mass))
    }
}

/// State recorded after each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotorState {
    pub position: f64,
    pub velocity: f64,
    /// Velocity change over the step (impulse / mass)
    pub velocity_change: f64,
}

#[derive(Debug, Clone)]
pub struct RigidRotor {
    config: RotorConfig,
    position: f64,
    velocity: f64,
    accumulated_impulse: f64,
    accumulated_torque: f64,
    history: Vec<RotorState>,
}

impl RigidRotor {
    pub fn new(config: RotorConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            position: 0.0,
            velocity: 0.0,
            accumulated_impulse: 0.0,
            accumulated_torque: 0.0,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &RotorConfig {
        &self.config
    }

    pub fn mass(&self) -> f64 {
        self.config.mass
    }

    /// Change the inertia between runs of a sweep.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), SimError> {
        validate_mass(mass)?;
        self.config.mass = mass;
        Ok(())
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn angular_momentum(&self) -> f64 {
        self.velocity * self.config.mass
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.abs() > EPSILON
    }

    /// Queue a torque for the next step.
    pub fn apply_torque(&mut self, torque: f64) {
        self.accumulated_torque += torque;
    }

    /// Queue an impulse for the next step.
    pub fn apply_impulse(&mut self, impulse: f64) {
        self.accumulated_impulse += impulse;
    }

    /// Stop the rotor in place, discarding anything queued.
    pub fn halt(&mut self) {
        self.velocity = 0.0;
        self.accumulated_impulse = 0.0;
        self.accumulated_torque = 0.0;
    }

    /// Integrate one timestep of `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let was_moving = self.is_moving();
        let impulse = self.config.friction_policy.corrected_impulse(&FrictionInput {
            mass: self.config.mass,
            velocity: self.velocity,
            moving: was_moving,
            accumulated_impulse: self.accumulated_impulse,
            accumulated_torque: self.accumulated_torque,
            static_friction: self.config.static_friction,
            kinetic_friction: self.config.kinetic_friction,
            dt,
        });
        self.accumulated_impulse = 0.0;
        self.accumulated_torque = 0.0;

        let velocity_change = impulse / self.config.mass;
        self.velocity += velocity_change;
        self.position += self.velocity * dt;

        if !self.is_moving() {
            self.velocity = 0.0;
        } else if !was_moving {
            trace!("rotor broke away at {:.4} rad/s", self.velocity);
        }

        self.history.push(RotorState {
            position: self.position,
            velocity: self.velocity,
            velocity_change,
        });
    }

    pub fn history(&self) -> &[RotorState] {
        &self.history
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().map(|s| s.position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().map(|s| s.velocity)
    }
}

impl Model for RigidRotor {
    fn reset(&mut self) {
        self.halt();
        self.position = 0.0;
        self.history.clear();
    }
}
