//! Configuration loading.
//!
//! Reads the optional `~/.config/copyshell/config.toml`. Every field has a
//! default, so a missing, empty or partial file is valid.

use std::fs;
use std::path::Path;

use copyshell_core::{CopyshellError, Result};
use serde::{Deserialize, Serialize};

use crate::paths::CopyshellPaths;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RootConfig {
    /// Log filter directive, e.g. `"debug"` or `"copyshell_core=trace"`
    pub log_level: Option<String>,
    pub shell: ShellConfig,
    pub clipboard: ClipboardConfig,
}

/// Interpreter every non-builtin line is handed to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    /// Arguments placed before the command line (the "run string" flag)
    pub args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                args: vec!["/C".to_string()],
            }
        } else {
            Self {
                program: "sh".to_string(),
                args: vec!["-c".to_string()],
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClipboardConfig {
    pub enabled: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Loads the configuration from the default path.
///
/// Never fails: a missing config directory or file yields the defaults,
/// and a malformed file is logged and replaced by the defaults. The error,
/// if any, is returned alongside so the caller can show it.
pub fn load_config() -> (RootConfig, Option<CopyshellError>) {
    let path = match CopyshellPaths::config_file() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("[Config] {}; using defaults", e);
            return (RootConfig::default(), None);
        }
    };

    match load_config_from(&path) {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::warn!("[Config] {}; using defaults", e);
            (RootConfig::default(), Some(e))
        }
    }
}

/// Loads the configuration from `path`.
///
/// # Returns
///
/// - `Ok(RootConfig::default())` if the file does not exist or is empty
/// - `Ok(config)` if the file parses
/// - `Err(CopyshellError::Config)` if the file cannot be read or parsed
pub fn load_config_from(path: &Path) -> Result<RootConfig> {
    if !path.exists() {
        return Ok(RootConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        CopyshellError::config(format!("Failed to read config file at {:?}: {}", path, e))
    })?;

    if content.trim().is_empty() {
        return Ok(RootConfig::default());
    }

    let config: RootConfig = toml::from_str(&content).map_err(|e| {
        CopyshellError::config(format!("Failed to parse TOML from {:?}: {}", path, e))
    })?;
    tracing::debug!("[Config] loaded {:?}", path);
    Ok(config)
}
