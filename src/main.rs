// latchkey - first-run activation gate
// Main entry point

use clap::Parser;
use crossterm::style::Stylize;
use std::process::ExitCode;

use latchkey::cli::{dispatch, Cli, TerminalShell};
use latchkey::config::constants::EXIT_FAILURE;
use latchkey::config::load_settings;
use latchkey::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    logging::init(&settings.logging);

    let mut shell = TerminalShell::new();
    ExitCode::from(dispatch(cli, &settings, &mut shell))
}
