//! Filesystem path completion.
//!
//! Candidates are *suffixes*: the text still missing after what the user
//! already typed. The line editor inserts them at the cursor instead of
//! replacing the whole token.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::session::expand_home;

/// One completion proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Full entry name as listed, with a trailing separator for directories
    pub display: String,
    /// Text to append at the cursor
    pub suffix: String,
}

impl CompletionCandidate {
    pub fn is_dir(&self) -> bool {
        self.display.ends_with(MAIN_SEPARATOR)
    }
}

/// Proposes directory entries for the token under the cursor.
#[derive(Debug, Clone, Default)]
pub struct PathCompleter {
    home: Option<PathBuf>,
}

impl PathCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `~/` resolution against `home`.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Completes the last whitespace-separated token of `line_before_cursor`.
    ///
    /// Relative directories resolve against `cwd`. An unreadable or missing
    /// directory yields no candidates. Results are sorted by name.
    pub fn complete(&self, line_before_cursor: &str, cwd: &Path) -> Vec<CompletionCandidate> {
        let token = current_token(line_before_cursor);
        let (dir_part, prefix) = split_token(token);

        let dir = self.resolve_dir(dir_part, cwd);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!("[Completer] cannot read {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut candidates: Vec<CompletionCandidate> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let rest = name.strip_prefix(prefix)?.to_string();
                // Follows symlinks so linked directories complete as directories
                let is_dir = entry.path().is_dir();
                Some(candidate(name, rest, is_dir))
            })
            .collect();

        candidates.sort_by(|a, b| a.display.cmp(&b.display));
        candidates
    }

    fn resolve_dir(&self, dir_part: &str, cwd: &Path) -> PathBuf {
        if dir_part.is_empty() {
            return cwd.to_path_buf();
        }
        if let Some(home) = &self.home {
            if let Some(expanded) = expand_home(dir_part, home) {
                return expanded;
            }
        }
        cwd.join(dir_part)
    }
}

fn candidate(name: String, rest: String, is_dir: bool) -> CompletionCandidate {
    if is_dir {
        CompletionCandidate {
            display: format!("{name}{MAIN_SEPARATOR}"),
            suffix: format!("{rest}{MAIN_SEPARATOR}"),
        }
    } else {
        CompletionCandidate {
            display: name,
            suffix: rest,
        }
    }
}

/// Text after the last whitespace run, or the whole line if there is none.
fn current_token(line: &str) -> &str {
    line.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Splits a token into `(directory part, name prefix)`.
///
/// The directory part keeps its trailing separator; it is empty when the
/// token names something in the current directory.
fn split_token(token: &str) -> (&str, &str) {
    match token.rfind(|c: char| c == '/' || c == MAIN_SEPARATOR) {
        Some(idx) => token.split_at(idx + 1),
        None => ("", token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("src")).unwrap();
        std::fs::create_dir(tmp.path().join("scripts")).unwrap();
        std::fs::write(tmp.path().join("setup.sh"), "").unwrap();
        std::fs::write(tmp.path().join("README.md"), "").unwrap();
        std::fs::write(tmp.path().join("src").join("main.rs"), "").unwrap();
        std::fs::write(tmp.path().join("src").join("mod.rs"), "").unwrap();
        tmp
    }

    fn suffixes(candidates: &[CompletionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.suffix.as_str()).collect()
    }

    #[test]
    fn test_current_token_uses_last_whitespace_run() {
        assert_eq!(current_token("ls -la   sr"), "sr");
        assert_eq!(current_token("cat"), "cat");
        assert_eq!(current_token("cat "), "");
        assert_eq!(current_token(""), "");
    }

    #[test]
    fn test_split_token() {
        assert_eq!(split_token("src/ma"), ("src/", "ma"));
        assert_eq!(split_token("/etc/"), ("/etc/", ""));
        assert_eq!(split_token("READ"), ("", "READ"));
    }

    #[test]
    fn test_suffixes_only_for_matching_prefix() {
        let tmp = fixture();
        let completer = PathCompleter::new();

        let candidates = completer.complete("ls s", tmp.path());
        assert_eq!(suffixes(&candidates), vec!["cripts/", "etup.sh", "rc/"]);
        for c in &candidates {
            assert_eq!(c.display, format!("s{}", c.suffix));
        }
    }

    #[test]
    fn test_directories_carry_trailing_separator() {
        let tmp = fixture();
        let candidates = PathCompleter::new().complete("cd sr", tmp.path());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].suffix, format!("c{MAIN_SEPARATOR}"));
        assert!(candidates[0].is_dir());

        let candidates = PathCompleter::new().complete("cat RE", tmp.path());
        assert_eq!(suffixes(&candidates), vec!["ADME.md"]);
        assert!(!candidates[0].is_dir());
    }

    #[test]
    fn test_completes_inside_subdirectory() {
        let tmp = fixture();
        let candidates = PathCompleter::new().complete("vim src/m", tmp.path());
        assert_eq!(suffixes(&candidates), vec!["ain.rs", "od.rs"]);
        assert_eq!(candidates[0].display, "main.rs");
    }

    #[test]
    fn test_absolute_directory_part() {
        let tmp = fixture();
        let line = format!("cat {}/src/mai", tmp.path().display());
        let candidates = PathCompleter::new().complete(&line, Path::new("/"));
        assert_eq!(suffixes(&candidates), vec!["n.rs"]);
    }

    #[test]
    fn test_home_directory_part() {
        let tmp = fixture();
        let completer = PathCompleter::new().with_home(tmp.path());
        let candidates = completer.complete("cd ~/sc", Path::new("/"));
        assert_eq!(suffixes(&candidates), vec!["ripts/"]);
    }

    #[test]
    fn test_empty_prefix_lists_everything_sorted() {
        let tmp = fixture();
        let candidates = PathCompleter::new().complete("ls ", tmp.path());
        let names: Vec<&str> = candidates.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(names, vec!["README.md", "scripts/", "setup.sh", "src/"]);
        // Nothing typed yet, so suffix and name coincide
        assert!(candidates.iter().all(|c| c.suffix == c.display));
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let tmp = fixture();
        let candidates = PathCompleter::new().complete("ls nope/x", tmp.path());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_exact_match_yields_empty_suffix() {
        let tmp = fixture();
        let candidates = PathCompleter::new().complete("cat setup.sh", tmp.path());
        assert_eq!(suffixes(&candidates), vec![""]);
    }
}
