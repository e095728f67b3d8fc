//! Unified path management for copyshell files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.copyshell_history           # Command history (see Session::history_path)
//!
//! ~/.config/copyshell/           # Config directory (dirs::config_dir)
//! ├── config.toml                # Optional configuration
//! └── logs/                      # Daily-rolling log files
//!     └── copyshell.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "copyshell";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path lookups for copyshell.
pub struct CopyshellPaths;

impl CopyshellPaths {
    /// Returns the copyshell configuration directory (e.g. `~/.config/copyshell/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let Ok(config_dir) = CopyshellPaths::config_dir() else {
            // No config dir on this platform (e.g. HOME unset in CI)
            return;
        };
        assert!(config_dir.ends_with("copyshell"));

        let config_file = CopyshellPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let Ok(config_dir) = CopyshellPaths::config_dir() else {
            return;
        };
        let logs_dir = CopyshellPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(&config_dir));
    }
}
