use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Optional override for the data directory (sessions and timer state)
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimerConfig {
    /// Refresh interval of `feed watch`
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    100
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SyncConfig {
    #[serde(default)]
    pub enabled: bool,
    pub url: Option<String>,
    /// Bearer token; the keyring takes precedence when it holds one
    pub token: Option<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    2
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            token: None,
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TimerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            anyhow::bail!("timer.tick_ms must be greater than 0");
        }
        Ok(())
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .context("sync.enabled is true but sync.url is not set")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("sync.url must be an http(s) URL, got '{}'", url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("sync.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Token from the keyring, falling back to the config file.
    pub fn resolve_token(&self) -> Option<String> {
        if let Ok(token) = crate::keyring::get_sync_token() {
            return Some(token);
        }
        self.token.clone()
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.timer.validate()?;
        self.sync.validate()?;
        Ok(())
    }
}

/// Load config from `path`. A missing file yields the defaults.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .build()
        .context("Failed to build config loader")?;

    loader
        .try_deserialize()
        .context("Failed to parse config file")
}

pub fn load() -> Result<Config> {
    let config_path = crate::platform::config_path()?;
    let config = load_from_path(&config_path)?;
    config.validate()?;
    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
