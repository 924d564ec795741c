//! Headless simulation - run the game loop without a terminal
//!
//! Plays a seeded random paddle against the real physics and prints a JSON
//! report.
//!
//! Usage:
//!   cargo run --bin simulate -- --frames 3600 --seed 7 --difficulty 3

use std::process::ExitCode;

use breakout::simulation::{SimConfig, run};

fn main() -> ExitCode {
    env_logger::init();

    let config = SimConfig::from_args(std::env::args().skip(1));
    let report = match run(config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("simulate: {}", e);
            return ExitCode::from(1);
        }
    };

    if report.invariant_violations > 0 {
        log::warn!(
            "{} frames broke arena invariants",
            report.invariant_violations
        );
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("simulate: failed to serialize report: {}", e);
            ExitCode::from(1)
        }
    }
}
