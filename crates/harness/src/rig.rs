//! The rotors and actuators taking part in one run.

use electrical::Actuator;
use mechanics::RigidRotor;
use simcore::{ActuatorId, RotorId, SimError};

/// Registered rotors and actuators, stepped in registration order.
///
/// Ids are handed out by this rig and index into it; an actuator's rotor is
/// owned here too, so it always outlives the actuator.
#[derive(Debug, Clone, Default)]
pub struct Rig {
    rotors: Vec<RigidRotor>,
    actuators: Vec<Actuator>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rotor(&mut self, rotor: RigidRotor) -> RotorId {
        self.rotors.push(rotor);
        RotorId(self.rotors.len() - 1)
    }

    /// Register `actuator`, rejecting it if its rotor is not registered here.
    pub fn add_actuator(&mut self, actuator: Actuator) -> Result<ActuatorId, SimError> {
        let RotorId(index) = actuator.rotor();
        if index >= self.rotors.len() {
            return Err(SimError::UnknownRotor(index));
        }
        self.actuators.push(actuator);
        Ok(ActuatorId(self.actuators.len() - 1))
    }

    pub fn rotor(&self, id: RotorId) -> &RigidRotor {
        &self.rotors[id.0]
    }

    pub fn rotor_mut(&mut self, id: RotorId) -> &mut RigidRotor {
        &mut self.rotors[id.0]
    }

    pub fn actuator(&self, id: ActuatorId) -> &Actuator {
        &self.actuators[id.0]
    }

    pub fn actuator_mut(&mut self, id: ActuatorId) -> &mut Actuator {
        &mut self.actuators[id.0]
    }

    pub fn rotors(&self) -> &[RigidRotor] {
        &self.rotors
    }

    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    /// First registered rotor, the one recorded in the run history.
    pub fn primary_rotor(&self) -> Option<&RigidRotor> {
        self.rotors.first()
    }

    /// First registered actuator, the one recorded in the run history.
    pub fn primary_actuator(&self) -> Option<&Actuator> {
        self.actuators.first()
    }

    pub fn clear(&mut self) {
        self.rotors.clear();
        self.actuators.clear();
    }

    /// Advance one physics tick: actuators push their torque first, then
    /// rotors integrate it.
    pub fn step(&mut self, dt: f64) {
        for actuator in &mut self.actuators {
            let rotor = &mut self.rotors[actuator.rotor().0];
            actuator.step(rotor);
        }
        for rotor in &mut self.rotors {
            rotor.step(dt);
        }
    }
}
