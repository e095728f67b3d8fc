//! Session state for one running Copyshell instance.
//!
//! The Session owns everything the dispatcher needs to know about "where"
//! and "who": the working directory every child runs in, and the identity
//! shown in the prompt. It is created once at startup and passed around
//! explicitly so tests can build one with fixed fields.

use std::path::{Component, Path, PathBuf};

use crate::error::{CopyshellError, Result};

/// File name of the history file, stored directly under the home directory.
pub const HISTORY_FILE_NAME: &str = ".copyshell_history";

/// Who is running the shell. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub hostname: String,
    pub home: PathBuf,
}

impl Identity {
    pub fn new(
        username: impl Into<String>,
        hostname: impl Into<String>,
        home: impl Into<PathBuf>,
    ) -> Self {
        Self {
            username: username.into(),
            hostname: hostname.into(),
            home: home.into(),
        }
    }
}

/// Process-wide state of one shell instance.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    cwd: PathBuf,
}

impl Session {
    /// Creates a session starting in `cwd`.
    pub fn new(identity: Identity, cwd: impl Into<PathBuf>) -> Self {
        Self {
            identity,
            cwd: normalize(&cwd.into()),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn hostname(&self) -> &str {
        &self.identity.hostname
    }

    pub fn home(&self) -> &Path {
        &self.identity.home
    }

    /// Current working directory. Children are spawned here.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Path of the persisted history file (`<home>/.copyshell_history`).
    pub fn history_path(&self) -> PathBuf {
        self.identity.home.join(HISTORY_FILE_NAME)
    }

    /// Working directory with the home directory abbreviated to `~`.
    pub fn display_cwd(&self) -> String {
        let home = self.home();
        // A root home would turn every path into "~/..."
        if home.parent().is_none() {
            return self.cwd.display().to_string();
        }

        match self.cwd.strip_prefix(home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => self.cwd.display().to_string(),
        }
    }

    /// Resolves a user-typed path against the session.
    ///
    /// A leading `~` or `~/` resolves against the home directory, relative
    /// paths against the working directory. `.` and `..` are folded
    /// lexically, the way an interactive shell's logical `cd` does.
    pub fn resolve(&self, target: &str) -> PathBuf {
        let joined = match expand_home(target, self.home()) {
            Some(expanded) => expanded,
            None => self.cwd.join(target),
        };
        normalize(&joined)
    }

    /// Changes the working directory in-process.
    ///
    /// `None` means the home directory. On failure the working directory is
    /// left untouched and the error displays as `cd: <path>: <reason>`.
    pub fn change_dir(&mut self, target: Option<&str>) -> Result<&Path> {
        let (shown, resolved) = match target {
            Some(t) => (PathBuf::from(t), self.resolve(t)),
            None => (self.home().to_path_buf(), normalize(self.home())),
        };

        let metadata = std::fs::metadata(&resolved)
            .map_err(|e| CopyshellError::change_directory(&shown, describe_io_error(&e)))?;
        if !metadata.is_dir() {
            return Err(CopyshellError::change_directory(&shown, "Not a directory"));
        }
        // Looking up "<dir>/." needs search permission on <dir>, the same
        // bit a child's chdir needs; read permission is irrelevant
        if let Err(e) = std::fs::metadata(resolved.join(".")) {
            return Err(CopyshellError::change_directory(&shown, describe_io_error(&e)));
        }

        tracing::debug!("[Session] cwd {} -> {}", self.cwd.display(), resolved.display());
        self.cwd = resolved;
        Ok(&self.cwd)
    }
}

/// Expands `~` and `~/rest` against `home`. Returns `None` for anything else.
pub fn expand_home(token: &str, home: &Path) -> Option<PathBuf> {
    if token == "~" {
        Some(home.to_path_buf())
    } else {
        token.strip_prefix("~/").map(|rest| home.join(rest))
    }
}

/// Folds `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // ".." at the root stays at the root
                if !out.pop() && out.as_os_str().is_empty() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn describe_io_error(err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => "No such file or directory".to_string(),
        std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => err.to_string(),
    }
}
