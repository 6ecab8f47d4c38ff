// CLI module
// Public interface for command-line interface

mod commands;
pub mod notices;
mod shell;

pub use commands::{dispatch, ActivateAction, Cli, Command};
pub use shell::{ScriptedShell, Shell, TerminalShell};
