//! Renders every scenario with every engine several times and checks the
//! bytes against the golden text. Exits non-zero on the first mismatch.
use std::process::ExitCode;
use anyhow::{bail, Result};
use colored::Colorize;
use object_model_demo::{Engine, Scenario};

const RUNS: usize = 3;

fn check(scenario: Scenario, engine: Engine) -> Result<()> {
    let expected = scenario.expected_output();
    for run in 0..RUNS {
        let actual = scenario.render(engine)?;
        if actual != expected {
            bail!("run {run}: expected\n{expected:?}\ngot\n{actual:?}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let mut failed = false;
    for scenario in Scenario::ALL {
        for engine in [Engine::Static, Engine::Descriptor] {
            match check(scenario, engine) {
                Ok(()) => eprintln!("{} {scenario:?} via {engine:?}", "✅".green()),
                Err(error) => {
                    failed = true;
                    eprintln!("{} {scenario:?} via {engine:?}: {error:#}", "❌".red());
                }
            }
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
