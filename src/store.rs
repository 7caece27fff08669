//! The persisted list of logged sessions.
//!
//! The store never trusts an in-memory copy: every read reloads from storage,
//! and every mutation runs reload-then-mutate-then-persist while holding the
//! storage lock for the `sessions` key. That lock is the only consistency
//! mechanism, which is enough for a single local writer.

use crate::error::StoreError;
use crate::storage::Storage;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SESSIONS_KEY: &str = "sessions";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Calendar date the session was logged, `YYYY-MM-DD`.
    pub date: String,
    /// Local time of day the session was logged, `HH:MM:SS`.
    pub time: String,
    /// Milliseconds.
    pub duration: u64,
    #[serde(rename = "sideCount", default)]
    pub side_count: u32,
}

/// Ordering used when presenting sessions and resolving positions for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum DisplayOrder {
    /// Most recently logged first, as `feed list` shows them.
    #[default]
    NewestFirst,
    /// Order in which sessions were logged.
    Logged,
}

impl DisplayOrder {
    /// Map a display position onto the logged position.
    fn resolve(self, index: usize, len: usize) -> Result<usize, StoreError> {
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        Ok(match self {
            DisplayOrder::Logged => index,
            DisplayOrder::NewestFirst => len - 1 - index,
        })
    }
}

pub struct SessionStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every persisted session in logging order.
    ///
    /// Missing or unreadable data is treated as an empty history.
    pub fn load_all(&self) -> Vec<SessionRecord> {
        let raw = match self.storage.get(SESSIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read sessions, starting empty");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Option<Vec<SessionRecord>>>(&raw) {
            Ok(sessions) => sessions.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Stored sessions are not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted sequence with `sessions`.
    pub fn persist(&self, sessions: &[SessionRecord]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(sessions)?;
        self.storage.set(SESSIONS_KEY, &content)?;
        debug!(count = sessions.len(), "Persisted sessions");
        Ok(())
    }

    /// Sessions arranged for presentation.
    pub fn display(&self, order: DisplayOrder) -> Vec<SessionRecord> {
        let mut sessions = self.load_all();
        if order == DisplayOrder::NewestFirst {
            sessions.reverse();
        }
        sessions
    }

    /// Append `record` and persist. Returns the full sequence after the write.
    pub fn append(&self, record: SessionRecord) -> Result<Vec<SessionRecord>, StoreError> {
        self.mutate(|sessions| {
            sessions.push(record);
            Ok(())
        })
    }

    /// Remove the record at `index` of the `order` view and persist.
    ///
    /// Returns the removed record and the full sequence after the write.
    pub fn delete_at(
        &self,
        index: usize,
        order: DisplayOrder,
    ) -> Result<(SessionRecord, Vec<SessionRecord>), StoreError> {
        let mut removed = None;
        let sessions = self.mutate(|sessions| {
            let position = order.resolve(index, sessions.len())?;
            removed = Some(sessions.remove(position));
            Ok(())
        })?;
        // mutate only returns Ok after the closure stored the record
        let removed = removed.ok_or(StoreError::IndexOutOfRange {
            index,
            len: sessions.len(),
        })?;
        Ok((removed, sessions))
    }

    fn mutate<F>(&self, f: F) -> Result<Vec<SessionRecord>, StoreError>
    where
        F: FnOnce(&mut Vec<SessionRecord>) -> Result<(), StoreError>,
    {
        let _guard = self.storage.lock(SESSIONS_KEY)?;
        let mut sessions = self.load_all();
        f(&mut sessions)?;
        self.persist(&sessions)?;
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn record(time: &str, duration: u64) -> SessionRecord {
        SessionRecord {
            date: "2026-01-07".to_string(),
            time: time.to_string(),
            duration,
            side_count: 1,
        }
    }

    #[test]
    fn test_load_all_empty_storage() {
        let store = SessionStore::new(MemoryStorage::default());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_malformed_is_empty() {
        let store = SessionStore::new(MemoryStorage::default());
        store.storage().set(SESSIONS_KEY, "{not json").unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_null_is_empty() {
        let store = SessionStore::new(MemoryStorage::default());
        store.storage().set(SESSIONS_KEY, "null").unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_persist_round_trip() {
        let store = SessionStore::new(MemoryStorage::default());
        let sessions = vec![record("08:00:00", 1000), record("13:30:00", 2500)];
        store.persist(&sessions).unwrap();
        assert_eq!(store.load_all(), sessions);
    }

    #[test]
    fn test_missing_side_count_defaults_to_zero() {
        let store = SessionStore::new(MemoryStorage::default());
        store
            .storage()
            .set(
                SESSIONS_KEY,
                r#"[{"date":"1/7/2026","time":"8:05:10 AM","duration":90000}]"#,
            )
            .unwrap();

        let sessions = store.load_all();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].side_count, 0);
        assert_eq!(sessions[0].duration, 90_000);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(record("08:00:00", 1000)).unwrap();
        assert_eq!(json["sideCount"], 1);
        assert_eq!(json["duration"], 1000);
        assert_eq!(json["time"], "08:00:00");
    }

    #[test]
    fn test_append_keeps_logging_order() {
        let store = SessionStore::new(MemoryStorage::default());
        store.append(record("08:00:00", 1)).unwrap();
        let all = store.append(record("09:00:00", 2)).unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(store.load_all()[1].time, "09:00:00");
        assert_eq!(store.display(DisplayOrder::NewestFirst)[0].time, "09:00:00");
    }

    #[test]
    fn test_delete_at_newest_first_position() {
        let store = SessionStore::new(MemoryStorage::default());
        store
            .persist(&[
                record("08:00:00", 1),
                record("09:00:00", 2),
                record("10:00:00", 3),
            ])
            .unwrap();

        let (removed, remaining) = store.delete_at(0, DisplayOrder::NewestFirst).unwrap();
        assert_eq!(removed.time, "10:00:00");
        assert_eq!(remaining.len(), 2);

        let (removed, _) = store.delete_at(0, DisplayOrder::Logged).unwrap();
        assert_eq!(removed.time, "08:00:00");
        assert_eq!(store.load_all(), vec![record("09:00:00", 2)]);
    }

    #[test]
    fn test_delete_at_out_of_range_leaves_data() {
        let store = SessionStore::new(MemoryStorage::default());
        store.persist(&[record("08:00:00", 1)]).unwrap();

        let err = store.delete_at(1, DisplayOrder::NewestFirst).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn test_delete_only_session_empties_store() {
        let store = SessionStore::new(MemoryStorage::default());
        store.append(record("08:00:00", 1)).unwrap();
        store.delete_at(0, DisplayOrder::NewestFirst).unwrap();
        assert!(store.load_all().is_empty());
    }
}
