use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_SYNC: &str = "feedtimer-sync";
const SYNC_USER: &str = "default";

fn sync_entry() -> Result<Entry> {
    Entry::new(SERVICE_SYNC, SYNC_USER).context("Failed to create keyring entry")
}

/// Store the remote sync token in the system keyring
///
/// The token is read back through a fresh entry, so a backend that keeps
/// nothing past the entry's lifetime is reported as an error.
pub fn store_sync_token(token: &str) -> Result<()> {
    sync_entry()?
        .set_password(token)
        .context("Failed to store sync token in keyring")?;

    match get_sync_token() {
        Ok(stored) if stored == token => Ok(()),
        _ => anyhow::bail!(
            "Keyring did not keep the sync token. Set sync.token in config.toml instead"
        ),
    }
}

/// Retrieve the remote sync token from the system keyring
pub fn get_sync_token() -> Result<String> {
    sync_entry()?
        .get_password()
        .context("Failed to retrieve sync token from keyring")
}

/// Delete the remote sync token from the system keyring
pub fn delete_sync_token() -> Result<()> {
    sync_entry()?
        .delete_credential()
        .context("Failed to delete sync token from keyring")
}
