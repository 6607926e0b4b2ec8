pub mod actuator;

pub use actuator::{Actuator, ActuatorConfig, ActuatorSample, COMMAND_EPSILON};
