//! Persistent command history.
//!
//! The file holds one raw input line per record, newline-terminated, and
//! is only ever appended to. Each accepted line is written immediately so
//! a crash loses nothing already entered.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use copyshell_core::{CopyshellError, Result};

/// Append-only history file.
///
/// If the file cannot be opened the store runs in memory-only mode: loads
/// return nothing and appends are accepted but not persisted.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    file: Option<File>,
}

impl HistoryStore {
    /// Opens (creating if absent) the history file at `path`.
    ///
    /// The error is returned next to the store rather than instead of it,
    /// so startup can continue without persistence.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<CopyshellError>) {
        let path = path.into();
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                tracing::debug!("[History] using {:?}", path);
                (
                    Self {
                        path,
                        file: Some(file),
                    },
                    None,
                )
            }
            Err(e) => {
                let err = CopyshellError::history(format!(
                    "Failed to open history file at {:?}: {}",
                    path, e
                ));
                tracing::warn!("[History] {}; history will not be saved", err);
                (Self { path, file: None }, Some(err))
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.file.is_some()
    }

    /// Reads all prior entries, oldest first. Blank records are skipped and
    /// invalid UTF-8 is replaced rather than ending the read.
    pub fn load(&self) -> Vec<String> {
        if !self.is_persistent() {
            return Vec::new();
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("[History] Failed to read {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for (index, record) in BufReader::new(file).split(b'\n').enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("[History] Failed to read {:?}: {}", self.path, e);
                    break;
                }
            };
            // A damaged record must not hide the ones after it
            let line = String::from_utf8_lossy(&record);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.contains('\u{FFFD}') {
                tracing::warn!("[History] record {} is not valid UTF-8", index + 1);
            }
            if !line.trim().is_empty() {
                entries.push(line.to_string());
            }
        }
        entries
    }

    /// Appends one entry and flushes it to disk.
    pub fn append(&mut self, line: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        // A record is a single line; embedded newlines would split it
        let record = line.replace(['\r', '\n'], " ");
        writeln!(file, "{}", record)
            .and_then(|_| file.flush())
            .map_err(|e| {
                CopyshellError::history(format!(
                    "Failed to write history file at {:?}: {}",
                    self.path, e
                ))
            })
    }

    /// Flushes and closes the file. Later appends are not persisted.
    pub fn close(&mut self) {
        if let Some(mut file) = self.file.take() {
            if let Err(e) = file.flush() {
                tracing::warn!("[History] Failed to flush {:?}: {}", self.path, e);
            }
        }
    }
}

impl Drop for HistoryStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".copyshell_history");

        let (store, err) = HistoryStore::open(&path);
        assert!(err.is_none());
        assert!(store.is_persistent());
        assert!(path.exists());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_entries_survive_reopen_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".copyshell_history");

        {
            let (mut store, _) = HistoryStore::open(&path);
            store.append("echo one").unwrap();
            store.append("ls -la | wc -l").unwrap();
        }
        {
            let (mut store, _) = HistoryStore::open(&path);
            store.append("cd /tmp").unwrap();
        }

        let (store, _) = HistoryStore::open(&path);
        assert_eq!(store.load(), vec!["echo one", "ls -la | wc -l", "cd /tmp"]);
        assert_eq!(
            fs_content(&path),
            "echo one\nls -la | wc -l\ncd /tmp\n".to_string()
        );
    }

    #[test]
    fn test_raw_line_is_kept_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history");
        let (mut store, _) = HistoryStore::open(&path);

        store.append("  echo   spaced  ").unwrap();
        assert_eq!(store.load(), vec!["  echo   spaced  "]);
    }

    #[test]
    fn test_unopenable_path_degrades_to_memory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("history");

        let (mut store, err) = HistoryStore::open(&path);
        assert!(matches!(err, Some(CopyshellError::History(_))));
        assert!(!store.is_persistent());
        assert!(store.append("echo hi").is_ok());
        assert!(store.load().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_close_stops_persisting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history");
        let (mut store, _) = HistoryStore::open(&path);

        store.append("first").unwrap();
        store.close();
        store.append("second").unwrap();

        assert_eq!(fs_content(&path), "first\n");
    }

    #[test]
    fn test_invalid_utf8_record_does_not_hide_later_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history");
        std::fs::write(&path, b"first\n\xff\xfe bad\nsecond\nthird\n").unwrap();

        let (store, _) = HistoryStore::open(&path);
        let entries = store.load();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], "first");
        assert!(entries[1].ends_with(" bad"));
        assert_eq!(&entries[2..], ["second", "third"]);
    }

    #[test]
    fn test_crlf_records_are_trimmed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history");
        std::fs::write(&path, "echo a\r\necho b\r\n").unwrap();

        let (store, _) = HistoryStore::open(&path);
        assert_eq!(store.load(), vec!["echo a", "echo b"]);
    }

    fn fs_content(path: &std::path::Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }
}
