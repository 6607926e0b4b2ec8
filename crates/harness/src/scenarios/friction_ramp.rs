use electrical::ActuatorConfig;
use mechanics::RotorConfig;
use simcore::{SimContext, SimError};

use super::{Plant, describe_plant};
use crate::rig::Rig;
use crate::scenario::Scenario;

/// Open-loop command rising linearly from zero, reaching full command at
/// `ramp_time`. Shows where static friction lets go.
#[derive(Debug, Clone)]
pub struct FrictionRamp {
    rotor: RotorConfig,
    actuator: ActuatorConfig,
    ramp_time: f64,
    plant: Option<Plant>,
}

impl FrictionRamp {
    pub fn new(rotor: RotorConfig, actuator: ActuatorConfig, ramp_time: f64) -> Self {
        Self {
            rotor,
            actuator,
            ramp_time,
            plant: None,
        }
    }

    pub fn plant(&self) -> Option<Plant> {
        self.plant
    }
}

impl Scenario for FrictionRamp {
    fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
        self.plant = Some(Plant::register(rig, &self.rotor, &self.actuator)?);
        Ok(())
    }

    fn control_loop(&mut self, _tick: usize, ctx: SimContext, rig: &mut Rig) {
        if let Some(plant) = self.plant {
            rig.actuator_mut(plant.actuator).set_command(ctx.t / self.ramp_time);
        }
    }

    fn label(&self) -> String {
        format!(
            "friction ramp over {} s, {}",
            self.ramp_time,
            describe_plant(&self.rotor, &self.actuator)
        )
    }
}
