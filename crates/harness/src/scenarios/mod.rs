//! Ready-made control experiments
//!
//! - Bang-bang velocity control toward a target profile
//! - PID tracking of a position or velocity profile, with feedforward
//!   and optional disturbance torques
//! - Open-loop command ramp for observing friction breakaway

pub mod bang_bang;
pub mod friction_ramp;
pub mod pid_tracking;

pub use bang_bang::BangBangVelocity;
pub use friction_ramp::FrictionRamp;
pub use pid_tracking::{Feedback, PidTracking};

use control::MotionProfile;
use electrical::{Actuator, ActuatorConfig};
use mechanics::{RigidRotor, RotorConfig};
use simcore::{ActuatorId, RotorId, SimError};

use crate::rig::Rig;

/// One rotor driven by one actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plant {
    pub rotor: RotorId,
    pub actuator: ActuatorId,
}

impl Plant {
    /// Build a fresh rotor and actuator from their configs and register both.
    pub fn register(
        rig: &mut Rig,
        rotor: &RotorConfig,
        actuator: &ActuatorConfig,
    ) -> Result<Plant, SimError> {
        let rotor = rig.add_rotor(RigidRotor::new(*rotor)?);
        let actuator = rig.add_actuator(Actuator::new(rotor, *actuator)?)?;
        Ok(Plant { rotor, actuator })
    }
}

/// Latest target and derivative read from a profile.
#[derive(Debug, Clone)]
pub struct TargetTracker<P> {
    profile: P,
    target: f64,
    derivative: f64,
}

impl<P: MotionProfile> TargetTracker<P> {
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            target: 0.0,
            derivative: 0.0,
        }
    }

    pub fn update(&mut self, t: f64) {
        self.target = self.profile.value(t);
        self.derivative = self.profile.derivative(t);
    }

    pub fn reset(&mut self) {
        self.target = 0.0;
        self.derivative = 0.0;
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn derivative(&self) -> f64 {
        self.derivative
    }
}

pub(crate) fn describe_plant(rotor: &RotorConfig, actuator: &ActuatorConfig) -> String {
    format!(
        "{} kg·m² flywheel (fs = {} N·m, fk = {} N·m, {:?}), motor {} rad/s / {} N·m",
        rotor.mass,
        rotor.static_friction,
        rotor.kinetic_friction,
        rotor.friction_policy,
        actuator.max_speed,
        actuator.stall_torque
    )
}
