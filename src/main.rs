use std::process::ExitCode;
use colored::Colorize;
use object_model_demo::{cli, logging};

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    logging::init(command_line_interface.verbose());
    match command_line_interface.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
