// Credentials store
//
// Reads and writes a single TOML document:
//
//   [general]
//   email = "user@example.com"
//
// A missing file means "never activated". Anything unreadable or
// mis-shaped is reported as corrupt so the caller can ask for a reset.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::activation::{validate_email, Activation};
use super::error::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct CredentialsFile {
    general: GeneralSection,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralSection {
    email: String,
}

/// File-backed activation storage at one fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored activation.
    ///
    /// The stored email goes back through validation, so a hand-edited
    /// address without exactly one `@` loads as an invalid record rather
    /// than an error.
    pub fn load(&self) -> Result<Activation, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                path: self.path.clone(),
            },
            _ => StoreError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let text = String::from_utf8(bytes).map_err(|_| self.corrupt("not valid UTF-8"))?;

        let file: CredentialsFile =
            toml::from_str(&text).map_err(|e| self.corrupt(e.message()))?;

        tracing::debug!(path = %self.path.display(), "Loaded credentials");
        Ok(validate_email(&file.general.email))
    }

    /// Persist a valid activation, replacing any existing file.
    ///
    /// The document is written to a temp file beside the target and then
    /// renamed over it, so readers never observe a half-written file.
    pub fn save(&self, activation: &Activation) -> Result<(), StoreError> {
        let email = match activation.email() {
            Some(email) if activation.is_valid() => email,
            _ => return Err(StoreError::InvalidRecord),
        };

        let document = CredentialsFile {
            general: GeneralSection {
                email: email.to_string(),
            },
        };
        let content = toml::to_string(&document).map_err(|e| self.corrupt(e.to_string()))?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| self.io(e))?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| self.io(e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.io(e))?;
        temp_file.flush().map_err(|e| self.io(e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.io(e.error))?;

        tracing::info!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    /// Delete the file. Returns `false` if there was nothing to delete.
    pub fn remove(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Credentials file removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io(e)),
        }
    }

    fn corrupt(&self, reason: impl Into<String>) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
