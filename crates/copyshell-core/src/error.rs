//! Error types for Copyshell.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A shared error type for the Copyshell crates.
///
/// Every failure a single command can produce is represented here so the
/// REPL can report it and keep going. None of these variants terminate a
/// session on their own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyshellError {
    /// `cd` target could not be entered. Displays with the `cd:` prefix
    /// so it can be printed inline as-is.
    #[error("cd: {}: {message}", path.display())]
    ChangeDirectory { path: PathBuf, message: String },

    /// The command interpreter could not be launched
    #[error("failed to run '{command}': {message}")]
    Spawn { command: String, message: String },

    /// Clipboard write failure
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// History file could not be opened or written
    #[error("History error: {0}")]
    History(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CopyshellError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a ChangeDirectory error
    pub fn change_directory(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ChangeDirectory {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a Spawn error
    pub fn spawn(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spawn {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a Clipboard error
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard(message.into())
    }

    /// Creates a History error
    pub fn history(message: impl Into<String>) -> Self {
        Self::History(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a directory-change error
    pub fn is_change_directory(&self) -> bool {
        matches!(self, Self::ChangeDirectory { .. })
    }

    /// Check if this is a spawn error
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Check if this is a clipboard error
    pub fn is_clipboard(&self) -> bool {
        matches!(self, Self::Clipboard(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CopyshellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, CopyshellError>`.
pub type Result<T> = std::result::Result<T, CopyshellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_directory_display_has_cd_prefix() {
        let err = CopyshellError::change_directory("/nonexistent", "No such file or directory");
        assert_eq!(err.to_string(), "cd: /nonexistent: No such file or directory");
        assert!(err.is_change_directory());
        assert!(!err.is_spawn());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CopyshellError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }
}
