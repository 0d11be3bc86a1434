//! Minimal CLI: run scenarios (static | descriptor) or dump their model as JSON
use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, Args};

use crate::scenario::{Engine, Scenario};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// object-model teaching scenarios: classes, instances, inheritance, polymorphism
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// log construction and method resolution to stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// run one scenario and print its output
    Run(RunOne),
    /// run every scenario in order
    All(RunAll),
    /// print a scenario's type descriptors as JSON
    Types(JsonOut),
    /// construct a scenario's instances and print their state as JSON
    State(JsonOut),
}

#[derive(Args, Debug, Clone)]
struct EngineSettings {
    /// which object model executes the scenario
    #[arg(long, value_enum, default_value_t = Engine::Static)]
    engine: Engine,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct RunOne {
    #[arg(value_enum)]
    scenario: Scenario,

    #[command(flatten)]
    engine_settings: EngineSettings,
}

#[derive(clap::Parser, Debug)]
struct RunAll {
    #[command(flatten)]
    engine_settings: EngineSettings,
}

#[derive(clap::Parser, Debug)]
struct JsonOut {
    #[arg(value_enum)]
    scenario: Scenario,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)?;
        out.flush()?;
        Ok(())
    }
    /// Same as [`Self::run`] with stdout replaced by `out`. `--out` files are
    /// still written to disk.
    pub fn run_to(&self, out: &mut dyn Write) -> Result<()> {
        // debug path
        if self.cmd.no_op() {
            eprintln!("{self:#?}");
            return Ok(())
        }
        match &self.cmd {
            Command::Run(target) => {
                target.scenario
                    .run(target.engine_settings.engine, out)
                    .with_context(|| format!("scenario {:?} failed", target.scenario))?;
            }
            Command::All(target) => {
                for scenario in Scenario::ALL {
                    scenario
                        .run(target.engine_settings.engine, out)
                        .with_context(|| format!("scenario {scenario:?} failed"))?;
                }
            }
            Command::Types(target) => {
                let types = target.scenario.types_json()?;
                write_json(&types, target.out.as_ref(), out)?;
            }
            Command::State(target) => {
                let state = target.scenario.state_json()?;
                write_json(&state, target.out.as_ref(), out)?;
            }
        }
        Ok(())
    }
}

impl Command {
    fn no_op(&self) -> bool {
        match self {
            Command::Run(target) => target.engine_settings.no_op,
            Command::All(target) => target.engine_settings.no_op,
            Command::Types(target) | Command::State(target) => target.no_op,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_json(value: &serde_json::Value, path: Option<&PathBuf>, out: &mut dyn Write) -> Result<()> {
    let src = serde_json::to_string_pretty(value)?;
    if let Some(path) = path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &src)
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        writeln!(out, "{src}")?;
    }
    Ok(())
}
