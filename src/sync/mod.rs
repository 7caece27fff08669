//! Best-effort upload of the session history to a remote endpoint.
//!
//! Local storage is the source of truth. A failed upload is logged and
//! reported, and never undoes the local write that preceded it.

pub mod client;
pub mod retry;

use crate::config::SyncConfig;
use crate::store::SessionRecord;
use client::SyncClient;
use retry::with_retry;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Sync is turned off in config.
    Disabled,
    Synced,
    Failed(String),
}

/// Push `sessions` if sync is enabled, swallowing any failure into the outcome.
pub fn push_best_effort(config: &SyncConfig, sessions: &[SessionRecord]) -> SyncOutcome {
    if !config.enabled {
        return SyncOutcome::Disabled;
    }
    let Some(url) = config.url.as_deref() else {
        return SyncOutcome::Disabled;
    };

    let client = match SyncClient::new(url, config.resolve_token(), config.timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build sync client");
            return SyncOutcome::Failed(e.to_string());
        }
    };

    match with_retry(|| client.push(sessions), config.max_retries) {
        Ok(()) => {
            info!(count = sessions.len(), "Synced sessions");
            SyncOutcome::Synced
        }
        Err(e) => {
            warn!(error = %e, "Sync failed, local data is unaffected");
            SyncOutcome::Failed(e.to_string())
        }
    }
}
