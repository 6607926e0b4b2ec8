//! Sweep the proportional gain of a velocity controller in parallel and
//! report how close each run settles to the target.

use control::{Constant, PidGains};
use electrical::ActuatorConfig;
use harness::scenarios::PidTracking;
use harness::sweep;
use mechanics::RotorConfig;
use simcore::SimConfig;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let config = SimConfig::new(5.0).with_control_frequency(1000.0);
    let gains = [0.01, 0.05, 0.1, 0.5, 1.0, 5.0];
    let runs = sweep(config, &gains, |&p| {
        PidTracking::velocity(
            RotorConfig::new(0.01).with_kinetic_friction(0.05),
            ActuatorConfig::cim(),
            PidGains::p(p),
            Constant(100.0),
        )
    });

    for (p, run) in gains.iter().zip(runs) {
        match run {
            Ok(harness) => {
                let settled = harness.history().last().map_or(0.0, |s| s.velocity);
                println!("P = {p:>5}: settled at {settled:8.3} rad/s");
            }
            Err(e) => println!("P = {p:>5}: {e}"),
        }
    }
}
