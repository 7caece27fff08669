//! Data directory resolution.
//!
//! Sessions, timer state and config all live under one per-user directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const APP_DIR_NAME: &str = ".feedtimer";

/// Get the data directory with a fallback chain.
///
/// Priority order:
/// 1. Explicit override (`storage.data_dir` in config)
/// 2. Home directory (~/.feedtimer)
/// 3. Platform data directory (XDG on Linux, AppData on Windows)
/// 4. Current working directory
///
/// Each candidate is checked for write access before being selected.
pub fn get_data_dir(override_dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.clone());
    }

    if let Some(home) = home::home_dir() {
        let dir = home.join(APP_DIR_NAME);
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
        warn!(dir = %dir.display(), "Cannot write to home data dir, trying fallbacks");
    }

    if let Some(data) = dirs::data_local_dir() {
        let dir = data.join("feedtimer");
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
    }

    let dir = PathBuf::from(APP_DIR_NAME);
    ensure_writable(&dir).context(
        "Cannot create data directory in any location. \
         Check file permissions or set storage.data_dir in config.",
    )?;
    Ok(dir)
}

/// Ensure a directory exists and is writable by the current user.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_path = dir.join(".write_test");
    fs::write(&test_path, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;

    // may be held by antivirus on Windows
    let _ = fs::remove_file(&test_path);

    Ok(())
}

/// Path of the config file, independent of any data dir override.
pub fn config_path() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(APP_DIR_NAME)
        .join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_dir_takes_priority() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().to_path_buf();

        let result = get_data_dir(Some(&override_path));
        assert_eq!(result.unwrap(), override_path);
    }

    #[test]
    fn test_ensure_writable_creates_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");

        assert!(ensure_writable(&nested).is_ok());
        assert!(nested.exists());
        assert!(!nested.join(".write_test").exists());
    }
}
