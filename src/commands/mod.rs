pub mod config;
pub mod sessions;
pub mod stats;
pub mod timer;
pub mod token;

use crate::config::Config;
use crate::platform;
use crate::storage::FileStorage;
use crate::store::{SessionRecord, SessionStore};
use crate::sync::{self, SyncOutcome};
use anyhow::Result;
use std::path::PathBuf;

pub(crate) fn data_dir(config: &Config) -> Result<PathBuf> {
    platform::get_data_dir(config.storage.data_dir.as_ref())
}

pub(crate) fn open_storage(config: &Config) -> Result<FileStorage> {
    Ok(FileStorage::new(data_dir(config)?))
}

pub(crate) fn open_store(config: &Config) -> Result<SessionStore<FileStorage>> {
    Ok(SessionStore::new(open_storage(config)?))
}

/// Push the current history upstream and tell the user if that failed.
pub(crate) fn sync_sessions(config: &Config, sessions: &[SessionRecord]) -> SyncOutcome {
    let outcome = sync::push_best_effort(&config.sync, sessions);
    if let SyncOutcome::Failed(reason) = &outcome {
        eprintln!("⚠ Remote sync failed ({}). Saved locally.", reason);
    }
    outcome
}
