//! Key-value persistence for small JSON documents.
//!
//! Each key maps to one file `<dir>/<key>.json`. Writes go through a temp file
//! and a rename so a crash mid-write never leaves a truncated document behind.

use crate::error::StoreError;
use fs2::FileExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Held for the span of a read-modify-write cycle.
    type Guard;

    /// Exclusive access to `key` until the guard drops.
    fn lock(&self, key: &str) -> Result<Self::Guard, StoreError>;

    /// Raw value stored under `key`, `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    type Guard = File;

    fn lock(&self, key: &str) -> Result<File, StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.dir.join(format!("{}.lock", key)))
            .map_err(io_err)?;
        file.lock_exclusive().map_err(io_err)?;
        Ok(file)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).map_err(io_err)?;
        fs::rename(&temp_path, &path).map_err(io_err)?;
        Ok(())
    }
}

/// In-process storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    type Guard = ();

    fn lock(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        assert_eq!(storage.get("sessions").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_then_get() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("nested"));

        storage.set("sessions", "[]").unwrap();
        assert_eq!(storage.get("sessions").unwrap().as_deref(), Some("[]"));
        assert!(temp.path().join("nested").join("sessions.json").exists());
        assert!(!temp.path().join("nested").join("sessions.tmp").exists());
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::default();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));
    }
}
