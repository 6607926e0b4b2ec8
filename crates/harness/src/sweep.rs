//! Parameter sweeps: one independent run per parameter value.

use rayon::prelude::*;
use simcore::{SimConfig, SimError};

use crate::harness::SimulationHarness;
use crate::scenario::Scenario;

/// Build a scenario for every value, run each on its own harness in
/// parallel, and return the finished harnesses in input order.
pub fn sweep<T, S, F>(
    config: SimConfig,
    values: &[T],
    make_scenario: F,
) -> Vec<Result<SimulationHarness<S>, SimError>>
where
    T: Sync,
    S: Scenario + Send,
    F: Fn(&T) -> S + Sync,
{
    values
        .par_iter()
        .map(|value| {
            let mut harness = SimulationHarness::new(config, make_scenario(value))?;
            harness.run()?;
            Ok(harness)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::FrictionRamp;
    use electrical::ActuatorConfig;
    use mechanics::RotorConfig;

    #[test]
    fn test_sweep_matches_sequential_runs() {
        let config = SimConfig::new(2.0).with_physics_step(0.001).with_control_frequency(100.0);
        let masses = [0.02, 0.05, 0.1, 0.5];
        let make = |mass: &f64| {
            FrictionRamp::new(
                RotorConfig::new(*mass).with_kinetic_friction(0.1).with_static_friction(0.2),
                ActuatorConfig::neverest_60(),
                10.0,
            )
        };

        let results = sweep(config, &masses, make);
        assert_eq!(results.len(), masses.len());

        for (mass, result) in masses.iter().zip(results) {
            let swept = result.unwrap();
            let mut sequential = SimulationHarness::new(config, make(mass)).unwrap();
            sequential.run().unwrap();
            assert_eq!(swept.history().samples(), sequential.history().samples());
            assert_eq!(swept.rig().rotors()[0].mass(), *mass);
        }
    }

    #[test]
    fn test_sweep_reports_per_value_errors() {
        let config = SimConfig::new(0.1).with_physics_step(0.01).with_control_frequency(100.0);
        let masses = [1.0, -1.0];
        let results = sweep(config, &masses, |mass: &f64| {
            FrictionRamp::new(RotorConfig::new(*mass), ActuatorConfig::cim(), 1.0)
        });
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SimError::InvalidMass(_))));
    }
}
