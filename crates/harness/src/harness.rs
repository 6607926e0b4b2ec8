//! Fixed-step simulation driver
//!
//! Physics advances every `physics_step`; the scenario's control loop runs
//! every `control_period_ticks` physics ticks, starting at tick 0.

use log::{debug, info, trace, warn};
use simcore::{SimConfig, SimContext, SimError};

use crate::history::{History, Sample};
use crate::rig::Rig;
use crate::scenario::Scenario;

/// Lifecycle of a harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarnessState {
    /// Built but never run, or `init` failed.
    #[default]
    Unconfigured,
    /// `init` registered the rig; no tick has run yet.
    Initialized,
    Running,
    /// Every tick ran; results are ready to read.
    Complete,
}

pub struct SimulationHarness<S: Scenario> {
    config: SimConfig,
    scenario: S,
    rig: Rig,
    history: History,
    state: HarnessState,
}

impl<S: Scenario> SimulationHarness<S> {
    /// Validate `config` and bind `scenario`. Nothing runs until [`run`](Self::run).
    pub fn new(config: SimConfig, scenario: S) -> Result<Self, SimError> {
        config.validate()?;
        if !config.control_period_is_exact() {
            warn!(
                "control frequency {} Hz does not divide the physics rate; running every {} ticks ({} Hz)",
                config.control_frequency,
                config.control_period_ticks(),
                1.0 / config.control_step()
            );
        }
        Ok(Self {
            config,
            scenario,
            rig: Rig::new(),
            history: History::new(),
            state: HarnessState::Unconfigured,
        })
    }

    /// Reset, initialize the scenario and run every tick.
    ///
    /// Runs are deterministic: running twice produces the same history.
    pub fn run(&mut self) -> Result<&History, SimError> {
        self.rig.clear();
        self.history.clear();
        self.state = HarnessState::Unconfigured;

        self.scenario.init(&mut self.rig)?;
        self.state = HarnessState::Initialized;

        let ticks = self.config.tick_count();
        let period = self.config.control_period_ticks();
        let physics_step = self.config.physics_step;
        let control_step = self.config.control_step();
        debug!(
            "running {}: {} ticks of {} s, control every {} ticks",
            self.scenario.label(),
            ticks,
            physics_step,
            period
        );

        self.state = HarnessState::Running;
        self.history.reserve(ticks);
        for tick in 0..ticks {
            let t = self.config.time_at(tick);

            self.scenario.raw_loop(tick, SimContext { dt: physics_step, t }, &mut self.rig);
            if tick % period == 0 {
                trace!("control tick {} at t = {}", tick / period, t);
                self.scenario.control_loop(
                    tick / period,
                    SimContext { dt: control_step, t },
                    &mut self.rig,
                );
            }
            self.rig.step(physics_step);

            let sample = self.sample(t);
            self.history.push(sample);
        }
        self.state = HarnessState::Complete;

        if let Some(worst) = self.history.largest_tracking_error() {
            info!(
                "completed {} ticks; largest tracking error {:.4} at t = {:.3} s",
                self.history.len(),
                worst.error,
                worst.time
            );
        }
        Ok(&self.history)
    }

    fn sample(&self, time: f64) -> Sample {
        let (position, velocity) = self
            .rig
            .primary_rotor()
            .map(|r| (r.position(), r.velocity()))
            .unwrap_or_default();
        let (command, torque) = self
            .rig
            .primary_actuator()
            .and_then(|a| a.history().last())
            .map(|s| (s.command, s.torque))
            .unwrap_or_default();

        Sample {
            time,
            position,
            velocity,
            command,
            torque,
            target: self.scenario.target(),
            target_derivative: self.scenario.target_derivative(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Simulated time of every tick, without running anything.
    pub fn frames(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.config.tick_count()).map(|tick| self.config.time_at(tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electrical::{Actuator, ActuatorConfig};
    use mechanics::{RigidRotor, RotorConfig};
    use simcore::{ActuatorId, RotorId};

    /// Records every callback and drives the motor at a constant command.
    #[derive(Default)]
    struct Probe {
        raw_ticks: Vec<usize>,
        control_calls: Vec<(usize, SimContext)>,
        inits: usize,
        actuator: Option<ActuatorId>,
    }

    impl Scenario for Probe {
        fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
            self.inits += 1;
            self.raw_ticks.clear();
            self.control_calls.clear();
            let rotor = rig.add_rotor(RigidRotor::new(RotorConfig::new(0.01))?);
            self.actuator = Some(rig.add_actuator(Actuator::new(rotor, ActuatorConfig::cim())?)?);
            Ok(())
        }

        fn raw_loop(&mut self, tick: usize, _ctx: SimContext, _rig: &mut Rig) {
            self.raw_ticks.push(tick);
        }

        fn control_loop(&mut self, tick: usize, ctx: SimContext, rig: &mut Rig) {
            self.control_calls.push((tick, ctx));
            if let Some(id) = self.actuator {
                rig.actuator_mut(id).set_command(0.5);
            }
        }

        fn label(&self) -> String {
            "probe".to_string()
        }
    }

    struct Misregistered;

    impl Scenario for Misregistered {
        fn init(&mut self, rig: &mut Rig) -> Result<(), SimError> {
            rig.add_actuator(Actuator::new(RotorId(3), ActuatorConfig::cim())?)?;
            Ok(())
        }

        fn control_loop(&mut self, _tick: usize, _ctx: SimContext, _rig: &mut Rig) {}

        fn label(&self) -> String {
            "misregistered".to_string()
        }
    }

    #[test]
    fn test_tick_count() {
        let config = SimConfig::new(20.0).with_physics_step(0.01).with_control_frequency(100.0);
        let mut harness = SimulationHarness::new(config, Probe::default()).unwrap();
        assert_eq!(harness.state(), HarnessState::Unconfigured);

        let history = harness.run().unwrap();
        assert_eq!(history.len(), 2001);
        assert_eq!(harness.scenario().raw_ticks.len(), 2001);
        assert_eq!(harness.rig().rotors()[0].history().len(), 2001);
        assert_eq!(harness.state(), HarnessState::Complete);
        assert_eq!(harness.frames().count(), 2001);
    }

    #[test]
    fn test_control_cadence() {
        let config = SimConfig::new(1.0).with_physics_step(0.001).with_control_frequency(100.0);
        let mut harness = SimulationHarness::new(config, Probe::default()).unwrap();
        harness.run().unwrap();

        let calls = &harness.scenario().control_calls;
        // ticks 0, 10, ..., 1000
        assert_eq!(calls.len(), 101);
        for (k, (tick, ctx)) in calls.iter().enumerate() {
            assert_eq!(*tick, k);
            assert!((ctx.t - k as f64 * 0.01).abs() < 1e-9);
            assert!((ctx.dt - 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_command_applies_from_tick_zero() {
        let config = SimConfig::new(0.1).with_physics_step(0.01).with_control_frequency(10.0);
        let mut harness = SimulationHarness::new(config, Probe::default()).unwrap();
        let history = harness.run().unwrap();

        let first = history.get(0).unwrap();
        assert_eq!(first.command, 0.5);
        assert!((first.torque - 1.21).abs() < 1e-12);
        assert!(first.velocity > 0.0);
        assert_eq!(first.time, 0.0);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let config = SimConfig::new(2.0).with_physics_step(0.001).with_control_frequency(50.0);
        let mut harness = SimulationHarness::new(config, Probe::default()).unwrap();
        let first = harness.run().unwrap().clone();
        let second = harness.run().unwrap();

        assert_eq!(first.samples(), second.samples());
        assert_eq!(harness.scenario().inits, 2);
        assert_eq!(harness.rig().rotors().len(), 1);
    }

    #[test]
    fn test_results_readable_alongside_scenario() {
        let config = SimConfig::new(0.5).with_physics_step(0.01).with_control_frequency(10.0);
        let mut harness = SimulationHarness::new(config, Probe::default()).unwrap();
        harness.run().unwrap();

        let history = harness.history();
        let label = harness.scenario().label();
        assert_eq!(label, "probe");
        assert_eq!(history.len(), 51);
        assert_eq!(harness.scenario().raw_ticks.len(), history.len());
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let config = SimConfig::new(1.0).with_physics_step(-0.001);
        assert!(matches!(
            SimulationHarness::new(config, Probe::default()),
            Err(SimError::InvalidPhysicsStep(_))
        ));
    }

    #[test]
    fn test_bad_registration_fails_at_init() {
        let mut harness = SimulationHarness::new(SimConfig::new(1.0), Misregistered).unwrap();
        assert!(matches!(harness.run(), Err(SimError::UnknownRotor(3))));
        assert_eq!(harness.state(), HarnessState::Unconfigured);
        assert!(harness.history().is_empty());
    }
}
