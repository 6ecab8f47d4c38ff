// Activation manager
//
// Owns the in-memory activation and drives the
// load -> validate -> prompt -> save -> reset transitions.
//
// A manager is only ever built through `ActivationScope`, which hands out
// the same instance for its whole lifetime (normally the process). The
// command layer owns the scope and passes the manager to whatever needs it.

use std::path::Path;
use tracing::{debug, error, info, warn};

use super::activation::{validate_email, Activation};
use super::error::{CredentialsError, Result, StoreError};
use super::store::CredentialStore;
use crate::cli::notices;
use crate::cli::Shell;
use crate::config::{PathSource, TelemetryConfig};

/// Holds at most one `ActivationManager`, created on first use.
pub struct ActivationScope {
    source: PathSource,
    telemetry: TelemetryConfig,
    current: Option<ActivationManager>,
}

impl ActivationScope {
    pub fn new(source: PathSource, telemetry: TelemetryConfig) -> Self {
        Self {
            source,
            telemetry,
            current: None,
        }
    }

    /// The scope's manager, constructing it on the first call.
    pub fn get_current(&mut self) -> Result<&mut ActivationManager> {
        let manager = match self.current.take() {
            Some(manager) => manager,
            None => ActivationManager::new(self.source.clone(), self.telemetry.clone())?,
        };
        Ok(self.current.insert(manager))
    }

    /// Discard the current manager, build a fresh one and delete the
    /// credentials file. Used by `latchkey activate reset`.
    pub fn reset(&mut self) -> Result<&mut ActivationManager> {
        let manager = self.get_current()?;
        manager.reset()?;
        Ok(manager)
    }
}

/// Activation state for one credentials file.
///
/// `Uninitialized` while `activation` is `None`; `Loaded` once a record
/// has been read or created. The only way back is `reset`.
#[derive(Debug)]
pub struct ActivationManager {
    activation: Option<Activation>,
    store: CredentialStore,
    source: PathSource,
    telemetry: TelemetryConfig,
}

impl ActivationManager {
    fn new(source: PathSource, telemetry: TelemetryConfig) -> Result<Self> {
        let path = source
            .resolve()
            .ok_or(CredentialsError::HomeDirUnavailable)?;
        debug!(path = %path.display(), "Activation manager created");

        Ok(Self {
            activation: None,
            store: CredentialStore::new(path),
            source,
            telemetry,
        })
    }

    pub fn activation(&self) -> Option<&Activation> {
        self.activation.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.activation.is_some()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Read the credentials file into memory.
    ///
    /// Loads at most once: when a record is already held this logs and
    /// returns without rereading the file.
    ///
    /// With `auto_resolve`, a missing file starts activation and a broken
    /// one is reset and then activated. Without it those cases surface as
    /// `NotActivated` and `CorruptCredentials`.
    pub fn load(&mut self, auto_resolve: bool, shell: &mut dyn Shell) -> Result<()> {
        if self.activation.is_some() {
            warn!("Credentials already loaded. Not rereading file.");
            return Ok(());
        }

        match self.store.load() {
            Ok(activation) => {
                self.activation = Some(activation);
                Ok(())
            }
            Err(StoreError::NotFound { path }) => {
                if !auto_resolve {
                    return Err(CredentialsError::NotActivated);
                }
                info!(path = %path.display(), "No credentials found; starting activation");
                self.activate(false, shell)
            }
            Err(e) => {
                if !auto_resolve {
                    return Err(CredentialsError::CorruptCredentials {
                        path: self.store.path().to_path_buf(),
                        source: e,
                    });
                }
                warn!(error = %e, "Unreadable credentials; resetting and reactivating");
                self.reset()?;
                self.activate(false, shell)
            }
        }
    }

    /// Gate used before normal operation.
    ///
    /// Returns the loaded activation when it is valid. Every failure is
    /// returned for the command layer to report and exit on.
    pub fn check_activated(
        &mut self,
        auto_resolve: bool,
        shell: &mut dyn Shell,
    ) -> Result<&Activation> {
        self.load(auto_resolve, shell)?;

        match self.activation.as_ref() {
            Some(activation) if activation.is_valid() => Ok(activation),
            Some(_) => Err(CredentialsError::InvalidActivation),
            None => Err(CredentialsError::NotActivated),
        }
    }

    /// Interactive activation.
    ///
    /// Fails with `AlreadyActivated` (a no-op exit) when a valid record
    /// exists and `InvalidActivation` when a stored one is bad. Otherwise
    /// prompts until a valid email is entered or the input closes.
    pub fn activate(&mut self, show_instructions: bool, shell: &mut dyn Shell) -> Result<()> {
        match self.load(false, shell) {
            Ok(()) | Err(CredentialsError::NotActivated) => {}
            Err(e) => return Err(e),
        }

        if let Some(activation) = &self.activation {
            return Err(if activation.is_valid() {
                CredentialsError::AlreadyActivated
            } else {
                CredentialsError::InvalidActivation
            });
        }

        loop {
            let input = shell
                .prompt(&notices::email_prompt(), "")
                .map_err(CredentialsError::Prompt)?;

            let activation = validate_email(&input);
            if !activation.is_valid() {
                debug!("Rejected email input; prompting again");
                shell.error(notices::RETRY_MESSAGE);
                continue;
            }

            self.store.save(&activation)?;
            self.activation = Some(activation);

            shell.print(&notices::telemetry_notice(
                self.telemetry.gather_usage_stats,
            ));
            if show_instructions {
                shell.print(&notices::instructions_notice());
            }
            info!(path = %self.store.path().display(), "Activation complete");
            return Ok(());
        }
    }

    /// Replace this manager with a fresh one and delete the credentials
    /// file. Deletion problems are logged, never returned.
    pub fn reset(&mut self) -> Result<()> {
        *self = ActivationManager::new(self.source.clone(), self.telemetry.clone())?;

        match self.store.remove() {
            Ok(true) => {}
            Ok(false) => warn!(
                path = %self.store.path().display(),
                "No credentials file to remove"
            ),
            Err(e) => error!(error = %e, "Error removing credentials file"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedShell;
    use std::fs;
    use tempfile::TempDir;

    fn scope_in(dir: &TempDir) -> ActivationScope {
        ActivationScope::new(
            PathSource::Fixed(dir.path().join("credentials.toml")),
            TelemetryConfig::default(),
        )
    }

    #[test]
    fn test_get_current_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["a@b.com"]);

        scope
            .get_current()
            .unwrap()
            .activate(false, &mut shell)
            .unwrap();

        // Same instance: the activation set above is still held
        assert!(scope.get_current().unwrap().is_loaded());
    }

    #[test]
    fn test_load_not_found_without_auto_resolve() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::default();

        let manager = scope.get_current().unwrap();
        let err = manager.load(false, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::NotActivated));
        assert!(!manager.is_loaded());
        assert_eq!(shell.prompts(), 0);
    }

    #[test]
    fn test_load_corrupt_without_auto_resolve() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::default();
        let manager = scope.get_current().unwrap();
        fs::write(manager.store_path(), "garbage = [").unwrap();

        let err = manager.load(false, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::CorruptCredentials { .. }));
        // File left alone for the user to inspect
        assert!(manager.store_path().exists());
    }

    #[test]
    fn test_load_not_found_with_auto_resolve_activates() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["me@example.com"]);
        let manager = scope.get_current().unwrap();

        manager.load(true, &mut shell).unwrap();
        assert_eq!(
            manager.activation().and_then(Activation::email),
            Some("me@example.com")
        );
        // Auto-resolve never shows the getting-started notice
        assert!(!shell.printed_contains("Get started"));
        assert!(shell.printed_contains("Telemetry"));
    }

    #[test]
    fn test_load_corrupt_with_auto_resolve_resets_and_activates() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["fresh@example.com"]);
        let manager = scope.get_current().unwrap();
        fs::write(manager.store_path(), "[general]\n").unwrap();

        manager.load(true, &mut shell).unwrap();
        let reloaded = CredentialStore::new(manager.store_path()).load().unwrap();
        assert_eq!(reloaded.email(), Some("fresh@example.com"));
    }

    #[test]
    fn test_second_load_does_not_reread() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::default();
        let manager = scope.get_current().unwrap();

        fs::write(manager.store_path(), "[general]\nemail = \"first@x.io\"\n").unwrap();
        manager.load(false, &mut shell).unwrap();

        fs::write(manager.store_path(), "[general]\nemail = \"second@x.io\"\n").unwrap();
        manager.load(false, &mut shell).unwrap();

        assert_eq!(
            manager.activation().and_then(Activation::email),
            Some("first@x.io")
        );
    }

    #[test]
    fn test_activate_with_stored_invalid_email() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["a@b.com"]);
        let manager = scope.get_current().unwrap();
        fs::write(manager.store_path(), "[general]\nemail = \"a@@b\"\n").unwrap();

        let err = manager.activate(true, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidActivation));
        assert_eq!(shell.prompts(), 0);
    }

    #[test]
    fn test_activate_propagates_corrupt() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["a@b.com"]);
        let manager = scope.get_current().unwrap();
        fs::write(manager.store_path(), "nonsense").unwrap();

        let err = manager.activate(true, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::CorruptCredentials { .. }));
        assert_eq!(shell.prompts(), 0);
    }

    #[test]
    fn test_activate_input_closed_is_prompt_error() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["nope", "still nope"]);
        let manager = scope.get_current().unwrap();

        let err = manager.activate(true, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::Prompt(_)));
        assert_eq!(shell.prompts(), 3);
        assert_eq!(shell.errors().len(), 2);
        assert!(!manager.store_path().exists());
    }

    #[test]
    fn test_check_activated_invalid_record() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::default();
        let manager = scope.get_current().unwrap();
        fs::write(manager.store_path(), "[general]\nemail = \"nobody\"\n").unwrap();

        let err = manager.check_activated(false, &mut shell).unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidActivation));
        assert!(err.to_string().contains("Activation email not valid"));
    }

    #[test]
    fn test_reset_clears_memory_and_file() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        let mut shell = ScriptedShell::new(["a@b.com"]);
        scope
            .get_current()
            .unwrap()
            .activate(false, &mut shell)
            .unwrap();

        let manager = scope.reset().unwrap();
        assert!(!manager.is_loaded());
        assert!(!manager.store_path().exists());
    }

    #[test]
    fn test_reset_without_file_succeeds() {
        let dir = TempDir::new().unwrap();
        let mut scope = scope_in(&dir);
        assert!(scope.reset().is_ok());
    }

    #[test]
    fn test_telemetry_disabled_notice() {
        let dir = TempDir::new().unwrap();
        let mut scope = ActivationScope::new(
            PathSource::Fixed(dir.path().join("credentials.toml")),
            TelemetryConfig {
                gather_usage_stats: false,
            },
        );
        let mut shell = ScriptedShell::new([""]);
        scope
            .get_current()
            .unwrap()
            .activate(true, &mut shell)
            .unwrap();
        assert!(shell.printed_contains("disabled"));
        assert!(shell.printed_contains("Get started"));
    }
}
