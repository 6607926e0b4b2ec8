//! Friction policies for the rigid rotor
//!
//! Two policies have been used for this rotor over time and they are not
//! numerically equivalent, so the choice is explicit and made per rotor:
//! - Kinetic-only: constant opposing torque while moving, static threshold at rest
//! - Clamped impulse: bounded decelerating impulse applied after the raw impulse

use serde::{Deserialize, Serialize};
use simcore::sign;

/// How friction corrects the impulse a rotor receives in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrictionPolicy {
    /// While moving, add a torque of `kinetic_friction` opposing the velocity.
    /// At rest, discard any net torque smaller than `static_friction`.
    #[default]
    KineticOnly,
    /// Compute the raw impulse, then remove up to `kinetic_friction * dt`
    /// against the direction of travel (moving), or up to
    /// `static_friction * dt` of the raw impulse (at rest), never past zero.
    ClampedImpulse,
}

/// Inputs to a friction correction for one step.
#[derive(Debug, Clone, Copy)]
pub struct FrictionInput {
    pub mass: f64,
    pub velocity: f64,
    pub moving: bool,
    pub accumulated_impulse: f64,
    pub accumulated_torque: f64,
    pub static_friction: f64,
    pub kinetic_friction: f64,
    pub dt: f64,
}

impl FrictionPolicy {
    /// Total impulse for the step after friction.
    pub fn corrected_impulse(&self, input: &FrictionInput) -> f64 {
        match self {
            FrictionPolicy::KineticOnly => kinetic_only(input),
            FrictionPolicy::ClampedImpulse => clamped_impulse(input),
        }
    }
}

fn kinetic_only(input: &FrictionInput) -> f64 {
    if !input.moving {
        let torque = if input.accumulated_torque.abs() < input.static_friction {
            0.0
        } else {
            input.accumulated_torque
        };
        return input.accumulated_impulse + torque * input.dt;
    }

    let drive = input.accumulated_impulse + input.accumulated_torque * input.dt;
    let friction = -sign(input.velocity) * input.kinetic_friction * input.dt;

    // Friction may stop the rotor but never push it the other way.
    let momentum_after_drive = input.mass * input.velocity + drive;
    let momentum_after = momentum_after_drive + friction;
    if sign(momentum_after) != sign(momentum_after_drive) {
        -input.mass * input.velocity
    } else {
        drive + friction
    }
}

fn clamped_impulse(input: &FrictionInput) -> f64 {
    let raw = input.accumulated_impulse + input.accumulated_torque * input.dt;

    if input.moving {
        let momentum_after = input.mass * input.velocity + raw;
        let deceleration = (input.kinetic_friction * input.dt).min(momentum_after.abs());
        raw - sign(momentum_after) * deceleration
    } else {
        let hold = (input.static_friction * input.dt).min(raw.abs());
        raw - sign(raw) * hold
    }
}
