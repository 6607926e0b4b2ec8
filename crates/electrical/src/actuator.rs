use mechanics::RigidRotor;
use serde::{Deserialize, Serialize};
use simcore::{Model, RotorId, SimError, sign};

/// Commands smaller than this are treated as zero by deadzone compensation.
pub const COMMAND_EPSILON: f64 = 0.001;

/// Torque-speed characteristics of a DC-style motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    /// Free speed at full command (rad/s)
    pub max_speed: f64,
    /// Torque at full command and zero speed (N·m)
    pub stall_torque: f64,
    /// Fraction of the command range near zero that produces no output
    #[serde(default)]
    pub deadzone: f64,
}

impl ActuatorConfig {
    pub fn new(max_speed: f64, stall_torque: f64) -> Self {
        ActuatorConfig {
            max_speed,
            stall_torque,
            deadzone: 0.0,
        }
    }

    /// AndyMark AM-0255 CIM
    pub fn cim() -> Self {
        ActuatorConfig::new(556.0, 2.42)
    }

    /// NeveRest 60 gearmotor
    pub fn neverest_60() -> Self {
        ActuatorConfig::new(11.0, 0.65)
    }

    pub fn with_deadzone(mut self, deadzone: f64) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(SimError::InvalidMaxSpeed(self.max_speed));
        }
        if !(self.stall_torque.is_finite() && self.stall_torque >= 0.0) {
            return Err(SimError::InvalidStallTorque(self.stall_torque));
        }
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(SimError::InvalidDeadzone(self.deadzone));
        }
        Ok(())
    }

    /// Map a command magnitude onto the torque-producing range `[deadzone, 1]`.
    fn expand(&self, magnitude: f64) -> f64 {
        (1.0 - self.deadzone) * (magnitude - 1.0) + 1.0
    }
}

/// Command and output recorded on each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActuatorSample {
    pub command: f64,
    pub torque: f64,
}

/// A motor driving one rotor.
///
/// The rotor is referenced by id; whoever owns both (the rig) hands the
/// rotor in when stepping.
#[derive(Debug, Clone)]
pub struct Actuator {
    rotor: RotorId,
    config: ActuatorConfig,
    command: f64,
    history: Vec<ActuatorSample>,
}

impl Actuator {
    pub fn new(rotor: RotorId, config: ActuatorConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Actuator {
            rotor,
            config,
            command: 0.0,
            history: Vec::new(),
        })
    }

    pub fn rotor(&self) -> RotorId {
        self.rotor
    }

    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    pub fn command(&self) -> f64 {
        self.command
    }

    /// Store `power` clamped to [-1, 1] and return the stored value.
    pub fn set_command(&mut self, power: f64) -> f64 {
        self.command = power.clamp(-1.0, 1.0);
        self.command
    }

    /// Command `power`, expanded so that any non-negligible request lands
    /// past the deadzone instead of ramping through it.
    pub fn set_command_with_deadzone_compensation(&mut self, power: f64) -> f64 {
        if power.abs() < COMMAND_EPSILON {
            self.set_command(0.0)
        } else {
            let expanded = self.config.expand(power.abs());
            self.set_command(expanded.copysign(power))
        }
    }

    /// Magnitude of the torque-producing part of the current command.
    pub fn effective_power(&self) -> f64 {
        if self.command == 0.0 {
            0.0
        } else {
            self.config.expand(self.command.abs())
        }
    }

    /// Speed at which the current command stops producing torque (rad/s).
    pub fn free_speed(&self) -> f64 {
        self.config.max_speed * self.effective_power()
    }

    /// Output torque for the current command at `rotor_velocity`.
    ///
    /// Falls linearly from the scaled stall torque at rest to zero at the
    /// free speed, in either direction of rotation.
    pub fn torque(&self, rotor_velocity: f64) -> f64 {
        let headroom = self.effective_power() - rotor_velocity.abs() / self.config.max_speed;
        sign(self.command) * headroom.max(0.0) * self.config.stall_torque
    }

    /// Push the current torque onto `rotor` and record it.
    pub fn step(&mut self, rotor: &mut RigidRotor) {
        let torque = self.torque(rotor.velocity());
        rotor.apply_torque(torque);
        self.history.push(ActuatorSample {
            command: self.command,
            torque,
        });
    }

    pub fn history(&self) -> &[ActuatorSample] {
        &self.history
    }

    pub fn commands(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().map(|s| s.command)
    }

    pub fn torques(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().map(|s| s.torque)
    }
}

impl Model for Actuator {
    fn reset(&mut self) {
        self.command = 0.0;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mechanics::RotorConfig;

    fn cim() -> Actuator {
        Actuator::new(RotorId(0), ActuatorConfig::cim()).unwrap()
    }

    #[test]
    fn test_command_is_clamped() {
        let mut actuator = cim();
        assert_eq!(actuator.set_command(10.0), 1.0);
        assert_eq!(actuator.set_command(-3.0), -1.0);
        assert_eq!(actuator.set_command(0.25), 0.25);
        assert_eq!(actuator.command(), 0.25);
    }

    #[test]
    fn test_stall_torque_at_rest() {
        let mut actuator = cim();
        actuator.set_command(1.0);
        assert_relative_eq!(actuator.torque(0.0), 2.42);
        actuator.set_command(-0.5);
        assert_relative_eq!(actuator.torque(0.0), -1.21);
    }

    #[test]
    fn test_zero_command_zero_torque() {
        let mut actuator =
            Actuator::new(RotorId(0), ActuatorConfig::cim().with_deadzone(0.2)).unwrap();
        actuator.set_command(0.0);
        assert_eq!(actuator.torque(0.0), 0.0);
        assert_eq!(actuator.torque(-100.0), 0.0);
    }

    #[test]
    fn test_torque_falls_linearly_with_speed() {
        let mut actuator = cim();
        actuator.set_command(0.5);

        let mut previous = f64::INFINITY;
        for i in 0..=60 {
            let speed = i as f64 * 10.0;
            let torque = actuator.torque(speed);
            assert!(torque >= 0.0);
            assert!(torque <= previous);
            // Direction of rotation does not matter
            assert_relative_eq!(torque, actuator.torque(-speed));
            previous = torque;
        }

        assert_relative_eq!(actuator.free_speed(), 278.0);
        assert_eq!(actuator.torque(278.0), 0.0);
        assert_eq!(actuator.torque(400.0), 0.0);
        assert_relative_eq!(actuator.torque(139.0), 0.25 * 2.42, max_relative = 1e-12);
    }

    #[test]
    fn test_torque_sign_follows_command_against_rotation() {
        let mut actuator = cim();
        actuator.set_command(-1.0);
        // Braking a rotor spinning forward
        let torque = actuator.torque(100.0);
        assert!(torque < 0.0);
        assert_relative_eq!(torque, -(1.0 - 100.0 / 556.0) * 2.42, max_relative = 1e-12);
    }

    #[test]
    fn test_deadzone_scales_torque_and_free_speed() {
        let config = ActuatorConfig::neverest_60().with_deadzone(0.2);
        let mut actuator = Actuator::new(RotorId(0), config).unwrap();

        actuator.set_command(0.5);
        // 0.8 * (0.5 - 1) + 1
        assert_relative_eq!(actuator.effective_power(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(actuator.torque(0.0), 0.6 * 0.65, epsilon = 1e-12);
        assert_relative_eq!(actuator.free_speed(), 0.6 * 11.0, epsilon = 1e-12);
        assert_relative_eq!(actuator.torque(3.3), (0.6 - 0.3) * 0.65, epsilon = 1e-12);
        assert_eq!(actuator.torque(6.7), 0.0);

        actuator.set_command(-0.5);
        assert_relative_eq!(actuator.torque(-3.3), -(0.6 - 0.3) * 0.65, epsilon = 1e-12);

        // Full command is unaffected by the deadzone
        actuator.set_command(1.0);
        assert_relative_eq!(actuator.torque(0.0), 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_deadzone_compensation() {
        let mut actuator =
            Actuator::new(RotorId(0), ActuatorConfig::neverest_60().with_deadzone(0.2)).unwrap();

        assert_eq!(actuator.set_command_with_deadzone_compensation(0.0005), 0.0);
        // 0.8 * (0.5 - 1) + 1
        assert_relative_eq!(actuator.set_command_with_deadzone_compensation(0.5), 0.6, epsilon = 1e-12);
        assert_relative_eq!(actuator.set_command_with_deadzone_compensation(-0.5), -0.6, epsilon = 1e-12);
        assert_relative_eq!(actuator.set_command_with_deadzone_compensation(2.0), 1.0);
        // Just past the threshold jumps to the deadzone boundary
        let small = actuator.set_command_with_deadzone_compensation(0.002);
        assert!(small > 0.2);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            Actuator::new(RotorId(0), ActuatorConfig::new(0.0, 1.0)),
            Err(SimError::InvalidMaxSpeed(_))
        ));
        assert!(matches!(
            Actuator::new(RotorId(0), ActuatorConfig::new(1.0, -1.0)),
            Err(SimError::InvalidStallTorque(_))
        ));
        assert!(matches!(
            Actuator::new(RotorId(0), ActuatorConfig::cim().with_deadzone(1.0)),
            Err(SimError::InvalidDeadzone(_))
        ));
    }

    #[test]
    fn test_step_applies_torque_to_rotor() {
        let mut rotor = RigidRotor::new(RotorConfig::new(0.01)).unwrap();
        let mut actuator = cim();
        actuator.set_command(1.0);

        actuator.step(&mut rotor);
        // Torque is only queued until the rotor steps
        assert_eq!(rotor.velocity(), 0.0);
        rotor.step(0.01);
        assert_relative_eq!(rotor.velocity(), 2.42, max_relative = 1e-12);

        assert_eq!(actuator.history().len(), 1);
        assert_eq!(actuator.commands().next(), Some(1.0));
        assert_relative_eq!(actuator.torques().next().unwrap(), 2.42);
    }
}
