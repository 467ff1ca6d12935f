//! Configuration file discovery and loading
//!
//! Resolution follows a fixed priority order, applied by each consumer:
//! 1. Environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Locate the config file for `app_name` on this platform
///
/// Linux checks `~/.config/<app>/config.toml` then `/etc/<app>/config.toml`;
/// other platforms use the per-user config directory only. Returns `None`
/// when no candidate file exists.
pub fn find_config_file(app_name: &str) -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(app_name).join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(app_name).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load a TOML config file, falling back to defaults when it is missing
///
/// A missing file is not an error: a warning is logged and `T::default()`
/// is returned. A file that exists but fails to parse is a `Config` error.
pub fn load_toml_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        warn!("Config file not found: {}, using defaults", path.display());
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    let parsed = toml::from_str::<T>(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!("Loaded config from {}", path.display());
    Ok(parsed)
}

/// Read and parse an environment variable override
///
/// Unset or whitespace-only variables yield `Ok(None)`. A set variable that
/// fails to parse is a `Config` error naming the variable.
pub fn env_override<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}
