use control::MotionProfile;
use electrical::ActuatorConfig;
use mechanics::RotorConfig;
use simcore::{SimContext, SimError};

use super::{Plant, TargetTracker, describe_plant};
use crate::rig::Rig;
use crate::scenario::Scenario;

/// Default band around the target inside which the motor is idle (rad/s).
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Full command toward the target velocity, idle within `threshold` of it.
#[derive(Debug, Clone)]
pub struct BangBangVelocity<P> {
    rotor: RotorConfig,
    actuator: ActuatorConfig,
    tracker: TargetTracker<P>,
    threshold: f64,
    plant: Option<Plant>,
}

impl<P: MotionProfile> BangBangVelocity<P> {
    pub fn new(rotor: RotorConfig, actuator: ActuatorConfig, profile: P) -> Self {
        Self {
            rotor,
            actuator,
            tracker: TargetTracker::new(profile),
            threshold: DEFAULT_THRESHOLD,
            plant: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn plant(&self) -> Option<Plant> {
        self.plant
    }

    pub fn rotor_config(&self) -> &RotorConfig {
        &self.rotor
    }
}

impl<P: MotionProfile> Scenario for BangBangVelocity<P> {
    fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
        self.tracker.reset();
        self.plant = Some(Plant::register(rig, &self.rotor, &self.actuator)?);
        Ok(())
    }

    fn raw_loop(&mut self, _tick: usize, ctx: SimContext, _rig: &mut Rig) {
        self.tracker.update(ctx.t);
    }

    fn control_loop(&mut self, _tick: usize, _ctx: SimContext, rig: &mut Rig) {
        let Some(plant) = self.plant else { return };
        let velocity = rig.rotor(plant.rotor).velocity();
        let target = self.tracker.target();

        let command = if (velocity - target).abs() > self.threshold {
            if velocity < target { 1.0 } else { -1.0 }
        } else {
            0.0
        };
        rig.actuator_mut(plant.actuator).set_command(command);
    }

    fn target(&self) -> f64 {
        self.tracker.target()
    }

    fn target_derivative(&self) -> f64 {
        self.tracker.derivative()
    }

    fn label(&self) -> String {
        format!(
            "velocity bang-bang (threshold {} rad/s), {}",
            self.threshold,
            describe_plant(&self.rotor, &self.actuator)
        )
    }
}
