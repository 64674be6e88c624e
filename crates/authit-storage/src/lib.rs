pub mod types;
pub mod prompt;
pub mod store;

// re-exports
pub use types::SecretStoreError;
pub use prompt::{LinePrompt, SecretPrompt, StdinPrompt};
pub use store::{default_secret_store_config, SecretStore, SecretStoreConfig};

use authit_auth::SecretDigest;

/// Load the secret digest from the default per-user location, prompting on
/// stdin when none is stored yet. Fails with
/// [`SecretStoreError::NotInteractive`] rather than reading a piped stdin.
pub fn load_or_prompt() -> Result<SecretDigest, SecretStoreError> {
    let store = SecretStore::new(default_secret_store_config()?);
    store.load_or_prompt(&mut StdinPrompt::stdin())
}
