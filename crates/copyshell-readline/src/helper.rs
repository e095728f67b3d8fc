//! rustyline helper: path completion, history hints and prompt colors.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use colored::Colorize;
use copyshell_core::{PathCompleter, Session};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::prompt::Prompt;

/// Editor helper bound to the session's working directory.
///
/// The editor owns the helper, so the REPL calls [`ShellHelper::sync`]
/// before every read to hand over the current directory and prompt.
pub struct ShellHelper {
    completer: PathCompleter,
    hinter: HistoryHinter,
    cwd: PathBuf,
    plain_prompt: String,
    colored_prompt: String,
}

impl ShellHelper {
    pub fn new(session: &Session) -> Self {
        let prompt = Prompt::for_session(session);
        Self {
            completer: PathCompleter::new().with_home(session.home()),
            hinter: HistoryHinter {},
            cwd: session.cwd().to_path_buf(),
            plain_prompt: prompt.plain(),
            colored_prompt: prompt.colored(),
        }
    }

    pub fn sync(&mut self, session: &Session, prompt: &Prompt) {
        self.cwd = session.cwd().to_path_buf();
        self.plain_prompt = prompt.plain();
        self.colored_prompt = prompt.colored();
    }

    fn candidates(&self, line: &str, pos: usize) -> Vec<Pair> {
        self.completer
            .complete(&line[..pos], &self.cwd)
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.display,
                replacement: candidate.suffix,
            })
            .collect()
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    /// Candidates replace nothing: their suffix is inserted at the cursor.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((pos, self.candidates(line, pos)))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default && prompt == self.plain_prompt {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dimmed().to_string())
    }
}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use copyshell_core::Identity;
    use std::fs;
    use std::path::MAIN_SEPARATOR;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Session) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("setup.sh"), "").unwrap();
        let session = Session::new(Identity::new("alice", "box", "/home/alice"), tmp.path());
        (tmp, session)
    }

    #[test]
    fn test_candidates_insert_suffix_only() {
        let (_tmp, session) = fixture();
        let helper = ShellHelper::new(&session);

        let pairs = helper.candidates("ls se", 5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].display, "setup.sh");
        assert_eq!(pairs[0].replacement, "tup.sh");
    }

    #[test]
    fn test_candidates_only_see_text_before_cursor() {
        let (_tmp, session) = fixture();
        let helper = ShellHelper::new(&session);

        // Cursor sits right after "sr"; the trailing text is ignored
        let pairs = helper.candidates("cd sr extra", 5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, format!("c{}", MAIN_SEPARATOR));
    }

    #[test]
    fn test_sync_follows_directory_changes() {
        let (tmp, mut session) = fixture();
        let mut helper = ShellHelper::new(&session);

        session.change_dir(Some("src")).unwrap();
        helper.sync(&session, &Prompt::for_session(&session));

        assert_eq!(helper.cwd, tmp.path().join("src"));
        assert!(helper.candidates("ls se", 5).is_empty());
        assert!(helper.plain_prompt.ends_with("src$ "));
    }

    #[test]
    fn test_only_default_prompt_is_colored() {
        let (_tmp, session) = fixture();
        let helper = ShellHelper::new(&session);
        let plain = helper.plain_prompt.clone();

        assert_eq!(helper.highlight_prompt(&plain, true), helper.colored_prompt);
        assert_eq!(helper.highlight_prompt("> ", true), "> ");
        assert_eq!(helper.highlight_prompt(&plain, false), plain);
    }
}
