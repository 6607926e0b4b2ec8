pub mod friction;
pub mod rotor;

pub use friction::{FrictionInput, FrictionPolicy};
pub use rotor::{RigidRotor, RotorConfig, RotorState, EPSILON};
