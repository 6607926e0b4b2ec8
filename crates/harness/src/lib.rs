//! Simulation harness for tuning motor control laws
//!
//! This crate provides:
//! - A rig holding rotors and the actuators driving them
//! - The `Scenario` trait for control experiments, plus ready-made scenarios
//! - A fixed-step harness running physics fast and control at a sub-rate
//! - Recorded per-tick history and parallel parameter sweeps

pub mod harness;
pub mod history;
pub mod rig;
pub mod scenario;
pub mod scenarios;
pub mod sweep;

pub use harness::{HarnessState, SimulationHarness};
pub use history::{History, Sample, TrackingError};
pub use rig::Rig;
pub use scenario::Scenario;
pub use sweep::sweep;
