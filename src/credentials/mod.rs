// Credentials module
// Activation record, file store and the activation state machine

mod activation;
mod error;
mod manager;
mod store;

pub use activation::{validate_email, Activation};
pub use error::{CredentialsError, Result, StoreError};
pub use manager::{ActivationManager, ActivationScope};
pub use store::CredentialStore;
