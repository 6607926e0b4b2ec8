use simcore::{SimContext, SimError};

use crate::rig::Rig;

/// A control experiment driven by the harness.
///
/// The harness calls `init` once per run on an empty rig, then on every
/// physics tick calls `raw_loop`, and on control ticks `control_loop`.
pub trait Scenario {
    /// Register rotors and actuators and reset any controller state.
    fn init(&mut self, rig: &mut Rig) -> Result<(), SimError>;

    /// Called on every physics tick before the control loop, with
    /// `ctx.dt` equal to the physics step. Use it for disturbances and
    /// targets that change faster than the control rate.
    fn raw_loop(&mut self, _tick: usize, _ctx: SimContext, _rig: &mut Rig) {}

    /// Called on control ticks. `tick` counts control ticks and `ctx.dt`
    /// is the control period.
    fn control_loop(&mut self, tick: usize, ctx: SimContext, rig: &mut Rig);

    /// Target recorded for the current tick.
    fn target(&self) -> f64 {
        0.0
    }

    /// Rate of change of the recorded target.
    fn target_derivative(&self) -> f64 {
        0.0
    }

    /// Gains and physical parameters, for labeling results.
    fn label(&self) -> String;
}

impl<S: Scenario + ?Sized> Scenario for Box<S> {
    fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
        (**self).init(rig)
    }

    fn raw_loop(&mut self, tick: usize, ctx: SimContext, rig: &mut Rig) {
        (**self).raw_loop(tick, ctx, rig)
    }

    fn control_loop(&mut self, tick: usize, ctx: SimContext, rig: &mut Rig) {
        (**self).control_loop(tick, ctx, rig)
    }

    fn target(&self) -> f64 {
        (**self).target()
    }

    fn target_derivative(&self) -> f64 {
        (**self).target_derivative()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}
