//! Classification of one input line.
//!
//! The built-in set is fixed and tiny, so this is an ordered exact-match
//! check rather than a registry.

/// Literal that ends the session.
pub const EXIT_COMMAND: &str = "exit";
/// The only command handled in-process.
pub const CHANGE_DIRECTORY_COMMAND: &str = "cd";
/// Command whose output never reaches the clipboard.
pub const CLIPBOARD_EXEMPT_COMMAND: &str = "copytree";

/// What an input line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line; nothing to do
    Empty,
    /// `exit`
    Exit,
    /// `cd [path]`; extra arguments are ignored
    ChangeDirectory { target: Option<&'a str> },
    /// Anything else, delegated to the system shell as-is
    External { name: &'a str, raw: &'a str },
}

impl<'a> Command<'a> {
    /// Classifies a line. Leading and trailing whitespace is ignored.
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        if trimmed == EXIT_COMMAND {
            return Command::Exit;
        }

        let mut tokens = trimmed.split_whitespace();
        // Non-empty after trim, so there is at least one token
        let name = tokens.next().unwrap_or(trimmed);

        if name == CHANGE_DIRECTORY_COMMAND {
            return Command::ChangeDirectory {
                target: tokens.next(),
            };
        }

        Command::External { name, raw: trimmed }
    }

    /// Whether the output of this command is kept off the clipboard.
    pub fn is_clipboard_exempt(&self) -> bool {
        matches!(self, Command::External { name, .. } if *name == CLIPBOARD_EXEMPT_COMMAND)
    }
}
