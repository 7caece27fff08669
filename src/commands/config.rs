use crate::config::{Config, save_to_path};
use crate::platform;
use anyhow::{Context, Result};
use serde_json::Value;

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Look up a dotted key such as `sync.url`.
pub fn lookup(config: &Config, key: &str) -> Result<Value> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    Ok(current.clone())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(config, key)? {
        Value::String(s) => println!("{}", s),
        Value::Null => println!("(unset)"),
        v => println!("{}", v),
    }
    Ok(())
}

/// Return a copy of `config` with `key` set to `raw`.
///
/// `raw` is read as a bool or number when it parses as one, otherwise as a
/// string. The result must still validate.
pub fn apply(config: &Config, key: &str, raw: &str) -> Result<Config> {
    let mut value = serde_json::to_value(config).context("Failed to serialize config")?;

    let (path, leaf) = match key.rsplit_once('.') {
        Some((path, leaf)) => (Some(path), leaf),
        None => (None, key),
    };

    let mut section = &mut value;
    for part in path.into_iter().flat_map(|p| p.split('.')) {
        section = section
            .get_mut(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    let section = section
        .as_object_mut()
        .with_context(|| format!("Key not found: {}", key))?;
    if !section.contains_key(leaf) {
        anyhow::bail!("Key not found: {}", key);
    }

    let parsed = serde_json::from_str::<Value>(raw)
        .ok()
        .filter(|v| v.is_boolean() || v.is_number())
        .unwrap_or_else(|| Value::String(raw.to_string()));
    section.insert(leaf.to_string(), parsed);

    let updated: Config = serde_json::from_value(value)
        .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
    updated.validate()?;
    Ok(updated)
}

pub fn set(key: &str, value: &str, config: &Config) -> Result<()> {
    let updated = apply(config, key, value)?;
    let path = platform::config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    save_to_path(&updated, &path)?;
    println!("✓ {} = {}", key, value);
    Ok(())
}
