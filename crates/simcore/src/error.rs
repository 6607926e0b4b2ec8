use thiserror::Error;

/// Errors raised while building a simulation.
///
/// Every variant is a construction-time contract violation: once a harness
/// has been built and its scenario initialized, stepping never fails.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f64),

    #[error("Invalid friction torque for {kind}: {value} (must be >= 0)")]
    InvalidFriction { kind: &'static str, value: f64 },

    #[error("Invalid physics_step: {0} (must be finite and > 0)")]
    InvalidPhysicsStep(f64),

    #[error("Invalid duration: {0} (must be finite and >= 0)")]
    InvalidDuration(f64),

    #[error("Invalid control_frequency: {0} Hz (must be finite and > 0)")]
    InvalidControlFrequency(f64),

    #[error("control_frequency {frequency} Hz is faster than the physics rate (step {physics_step} s)")]
    ControlPeriodTooShort { frequency: f64, physics_step: f64 },

    #[error("Invalid max_speed: {0} (must be finite and > 0)")]
    InvalidMaxSpeed(f64),

    #[error("Invalid stall_torque: {0} (must be finite and >= 0)")]
    InvalidStallTorque(f64),

    #[error("Invalid deadzone: {0} (must be in [0, 1))")]
    InvalidDeadzone(f64),

    #[error("Trajectory needs at least one control point")]
    EmptyTrajectory,

    #[error("Tangent count mismatch: {points} points, {tangents} tangents")]
    TangentCountMismatch { points: usize, tangents: usize },

    #[error("Invalid segment duration: {0} (must be finite and > 0)")]
    InvalidSegmentDuration(f64),

    #[error("Invalid derivative step: {0} (must be finite and > 0)")]
    InvalidDerivativeStep(f64),

    #[error("Schedule mismatch: {times} switch times, {values} values")]
    ScheduleMismatch { times: usize, values: usize },

    #[error("Schedule switch times must be ascending (index {0})")]
    UnsortedSchedule(usize),

    #[error("Actuator bound to unknown rotor {0}")]
    UnknownRotor(usize),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}
