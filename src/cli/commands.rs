// Command definitions and dispatch

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::Shell;
use crate::config::constants::EXIT_OK;
use crate::config::{PathSource, Settings};
use crate::credentials::{ActivationScope, CredentialsError};

#[derive(Parser, Debug)]
#[command(name = "latchkey")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "First-run activation gate", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this credentials file instead of ~/.latchkey/credentials.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate by entering an email address (or leaving it blank)
    Activate {
        #[command(subcommand)]
        action: Option<ActivateAction>,
    },

    /// Exit non-zero unless a valid activation exists
    Check {
        /// Run activation instead of failing when credentials are missing or broken
        #[arg(long)]
        auto_resolve: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ActivateAction {
    /// Delete saved credentials so activation can start over
    Reset,
}

/// Run one command and return the process exit status.
///
/// Owns the activation scope for the duration of the command. Failures
/// are reported through `shell`; nothing here panics or exits.
pub fn dispatch(cli: Cli, settings: &Settings, shell: &mut dyn Shell) -> u8 {
    let source = cli
        .credentials
        .map(PathSource::Fixed)
        .unwrap_or_default();
    let mut scope = ActivationScope::new(source, settings.telemetry.clone());

    let result = match cli.command {
        Command::Activate { action: None } => scope
            .get_current()
            .and_then(|manager| manager.activate(true, shell)),
        Command::Activate {
            action: Some(ActivateAction::Reset),
        } => scope.reset().map(|manager| {
            tracing::info!(path = %manager.store_path().display(), "Credentials reset");
        }),
        Command::Check { auto_resolve } => scope
            .get_current()
            .and_then(|manager| manager.check_activated(auto_resolve, shell).map(|_| ())),
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(e) => report(&e, shell),
    }
}

fn report(err: &CredentialsError, shell: &mut dyn Shell) -> u8 {
    let code = err.exit_code();
    if code == EXIT_OK {
        shell.print(&err.to_string());
    } else {
        tracing::debug!(error = ?err, "Command failed");
        shell.error(&err.to_string());
    }
    code
}
