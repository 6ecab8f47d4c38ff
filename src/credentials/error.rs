// Error types for credential storage and activation

use std::path::PathBuf;

use thiserror::Error;

use crate::config::constants::{EXIT_FAILURE, EXIT_OK};

/// Outcome of a failed store operation.
///
/// `NotFound` is the expected never-activated state and is kept apart
/// from `Corrupt` and `Io` so callers can choose between prompting and
/// asking for a reset.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Credentials file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Credentials file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to save an activation that failed validation")]
    InvalidRecord,
}

/// Failures surfaced by the activation manager to the command layer.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Credentials not found. Please run \"latchkey activate\".")]
    NotActivated,

    #[error(
        "Unable to load credentials from {}.\nRun \"latchkey activate reset\" and try again.",
        path.display()
    )]
    CorruptCredentials {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error(
        "Activation email not valid. Please run \"latchkey activate reset\" then \"latchkey activate\"."
    )]
    InvalidActivation,

    #[error("Already activated")]
    AlreadyActivated,

    #[error("Activation aborted: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot determine home directory; set LATCHKEY_HOME or pass --credentials")]
    HomeDirUnavailable,
}

impl CredentialsError {
    /// Process exit status the command layer should terminate with.
    /// "Already activated" is a no-op, not a failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CredentialsError::AlreadyActivated => EXIT_OK,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, CredentialsError>;
