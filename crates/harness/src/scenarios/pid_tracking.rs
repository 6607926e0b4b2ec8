use control::{DerivativeScaling, MotionProfile, Pid, PidGains, StepSchedule};
use electrical::ActuatorConfig;
use mechanics::RotorConfig;
use simcore::{Model, SimContext, SimError};

use super::{Plant, TargetTracker, describe_plant};
use crate::rig::Rig;
use crate::scenario::Scenario;

/// Which rotor quantity the controller compares with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Position,
    Velocity,
}

/// PID with feedforward tracking a motion profile.
///
/// The target and its derivative are refreshed every physics tick; the
/// derivative is fed forward through the controller's `f` gain.
#[derive(Debug, Clone)]
pub struct PidTracking<P> {
    rotor: RotorConfig,
    actuator: ActuatorConfig,
    feedback: Feedback,
    pid: Pid,
    tracker: TargetTracker<P>,
    disturbance: Option<StepSchedule>,
    deadzone_compensation: bool,
    plant: Option<Plant>,
}

impl<P: MotionProfile> PidTracking<P> {
    pub fn new(
        rotor: RotorConfig,
        actuator: ActuatorConfig,
        feedback: Feedback,
        gains: PidGains,
        profile: P,
    ) -> Self {
        Self {
            rotor,
            actuator,
            feedback,
            pid: Pid::new(gains),
            tracker: TargetTracker::new(profile),
            disturbance: None,
            deadzone_compensation: false,
            plant: None,
        }
    }

    /// Track the profile as a position (rad).
    pub fn position(rotor: RotorConfig, actuator: ActuatorConfig, gains: PidGains, profile: P) -> Self {
        Self::new(rotor, actuator, Feedback::Position, gains, profile)
    }

    /// Track the profile as a velocity (rad/s).
    pub fn velocity(rotor: RotorConfig, actuator: ActuatorConfig, gains: PidGains, profile: P) -> Self {
        Self::new(rotor, actuator, Feedback::Velocity, gains, profile)
    }

    /// External torque applied to the rotor on every physics tick.
    pub fn with_disturbance(mut self, disturbance: StepSchedule) -> Self {
        self.disturbance = Some(disturbance);
        self
    }

    /// Send commands through the actuator's deadzone compensation.
    pub fn with_deadzone_compensation(mut self) -> Self {
        self.deadzone_compensation = true;
        self
    }

    pub fn with_derivative_scaling(mut self, scaling: DerivativeScaling) -> Self {
        self.pid = self.pid.with_derivative_scaling(scaling);
        self
    }

    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    pub fn plant(&self) -> Option<Plant> {
        self.plant
    }

    pub fn profile(&self) -> &P {
        self.tracker.profile()
    }

    /// Disturbance torque at time `t`, zero when none is configured.
    pub fn disturbance_at(&self, t: f64) -> f64 {
        self.disturbance.as_ref().map_or(0.0, |d| d.value(t))
    }
}

impl<P: MotionProfile> Scenario for PidTracking<P> {
    fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
        self.pid.reset();
        self.tracker.reset();
        self.plant = Some(Plant::register(rig, &self.rotor, &self.actuator)?);
        Ok(())
    }

    fn raw_loop(&mut self, _tick: usize, ctx: SimContext, rig: &mut Rig) {
        self.tracker.update(ctx.t);
        if let Some(plant) = self.plant {
            let torque = self.disturbance_at(ctx.t);
            if torque != 0.0 {
                rig.rotor_mut(plant.rotor).apply_torque(torque);
            }
        }
    }

    fn control_loop(&mut self, _tick: usize, ctx: SimContext, rig: &mut Rig) {
        let Some(plant) = self.plant else { return };
        let rotor = rig.rotor(plant.rotor);
        let measured = match self.feedback {
            Feedback::Position => rotor.position(),
            Feedback::Velocity => rotor.velocity(),
        };

        let error = self.tracker.target() - measured;
        let output = self
            .pid
            .push_error_with_feedforward(error, ctx.dt, self.tracker.derivative());

        let actuator = rig.actuator_mut(plant.actuator);
        if self.deadzone_compensation {
            actuator.set_command_with_deadzone_compensation(output);
        } else {
            actuator.set_command(output);
        }
    }

    fn target(&self) -> f64 {
        self.tracker.target()
    }

    fn target_derivative(&self) -> f64 {
        self.tracker.derivative()
    }

    fn label(&self) -> String {
        let gains = self.pid.gains();
        format!(
            "{:?} PID (P={}, I={}, D={}, F={}), {}",
            self.feedback,
            gains.p,
            gains.i,
            gains.d,
            gains.f,
            describe_plant(&self.rotor, &self.actuator)
        )
    }
}
