use serde::{Deserialize, Serialize};

/// Timing of the current callback: simulated time and the step it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

/// Index of a rotor registered with a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotorId(pub usize);

/// Index of an actuator registered with a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorId(pub usize);

pub trait Model {
    /// Return to the freshly constructed state, keeping configuration.
    fn reset(&mut self);
}
