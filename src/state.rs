//! Timer state that has to outlive a single `feed` invocation.
//!
//! Stored under the `state` key of the same [`Storage`] that holds the
//! sessions, so both documents share one lock and atomic-write path.

use crate::storage::Storage;
use crate::timer::TimerState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const STATE_KEY: &str = "state";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct State {
    #[serde(default)]
    pub timer: TimerState,
}

impl State {
    pub fn load<S: Storage>(storage: &S) -> Result<Self> {
        let Some(content) = storage.get(STATE_KEY).context("Failed to read state")? else {
            return Ok(Self::default());
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).context("Failed to parse state JSON")
    }

    pub fn save<S: Storage>(&self, storage: &S) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        storage
            .set(STATE_KEY, &content)
            .context("Failed to write state")
    }
}

/// Run `f` against the persisted state while holding the state lock.
///
/// The state is saved only if `f` succeeds.
pub fn with_state_lock<S, F, R>(storage: &S, f: F) -> Result<R>
where
    S: Storage,
    F: FnOnce(&mut State) -> Result<R>,
{
    let _guard = storage
        .lock(STATE_KEY)
        .context("Failed to acquire state lock")?;

    let mut state = State::load(storage)?;
    let result = f(&mut state)?;
    state.save(storage)?;

    Ok(result)
}
