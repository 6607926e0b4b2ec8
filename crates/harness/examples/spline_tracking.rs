//! Position PID following a spline through three waypoints.
//!
//! Usage: `cargo run -p harness --example spline_tracking [config.json]`
//! where the optional file holds a `SimConfig` such as
//! `{"duration": 60.0, "physics_step": 0.001, "control_frequency": 100.0}`.

use std::error::Error;

use control::{PidGains, TrajectoryGenerator};
use electrical::ActuatorConfig;
use harness::scenarios::PidTracking;
use harness::{Scenario, SimulationHarness};
use mechanics::RotorConfig;
use simcore::SimConfig;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SimConfig::new(60.0)
            .with_physics_step(0.001)
            .with_control_frequency(100.0),
    };

    let trajectory = TrajectoryGenerator::spanning(vec![0.0, 5.0, -2.0], config.duration)?;
    let scenario = PidTracking::position(
        RotorConfig::new(0.5)
            .with_kinetic_friction(0.1)
            .with_static_friction(0.2),
        ActuatorConfig::neverest_60(),
        PidGains::pidf(5.0, 1.2, 3.0, 1.0),
        trajectory,
    )
    .with_deadzone_compensation();

    let mut harness = SimulationHarness::new(config, scenario)?;
    harness.run()?;
    let history = harness.history();

    println!("{}", harness.scenario().label());
    println!("cycles: {}", history.len());
    if let Some(worst) = history.largest_tracking_error() {
        println!(
            "largest tracking error: {:.4} rad at t = {:.3} s",
            worst.error, worst.time
        );
    }
    if let Some(last) = history.last() {
        println!("final position: {:.4} rad", last.position);
    }
    Ok(())
}
