//! Turns dispatch outcomes into user-facing notices.

use colored::Colorize;
use copyshell_core::{ClipboardOutcome, DispatchOutcome, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// One line to show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn print(&self) {
        match self.level {
            Level::Info => println!("{}", self.text.bright_black()),
            Level::Warning => println!("{}", self.text.yellow()),
            Level::Error => eprintln!("{}", self.text.red()),
        }
    }
}

/// Notices for an outcome. Successful copies and plain non-zero exits are
/// silent; the command's own output already said everything.
pub fn notices(outcome: &DispatchOutcome) -> Vec<Notice> {
    match outcome {
        DispatchOutcome::Idle | DispatchOutcome::Exit | DispatchOutcome::ChangedDirectory(_) => {
            Vec::new()
        }
        DispatchOutcome::DirectoryChangeFailed(e) => vec![Notice::new(Level::Error, e.to_string())],
        DispatchOutcome::Executed(report) => {
            let mut notices = Vec::new();
            if let Termination::SpawnFailed(message) = &report.termination {
                notices.push(Notice::new(Level::Error, message.clone()));
            }
            match &report.clipboard {
                ClipboardOutcome::Exempt => notices.push(Notice::new(
                    Level::Info,
                    format!("📋 {} output was not copied to clipboard.", report.command),
                )),
                ClipboardOutcome::Failed(e) => notices.push(Notice::new(
                    Level::Warning,
                    format!("⚠️  Failed to copy to clipboard: {}", e),
                )),
                ClipboardOutcome::Copied { .. }
                | ClipboardOutcome::Empty
                | ClipboardOutcome::Disabled => {}
            }
            notices
        }
    }
}
