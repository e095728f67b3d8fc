//! Command dispatcher.
//!
//! Routes one accepted line: `cd` is handled in-process against the
//! [`Session`], everything else goes through the [`CommandExecutor`] and
//! its captured output is offered to the clipboard.

use std::path::PathBuf;

use crate::clipboard::ClipboardSink;
use crate::command::Command;
use crate::error::CopyshellError;
use crate::execution::{CommandExecutor, Termination};
use crate::session::Session;

/// What happened to the captured output of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardOutcome {
    /// Output handed to the clipboard
    Copied { bytes: usize },
    /// Nothing was captured, so nothing was copied
    Empty,
    /// `copytree` output is never copied
    Exempt,
    /// Clipboard copying is switched off
    Disabled,
    /// The clipboard rejected the write
    Failed(CopyshellError),
}

/// Summary of one delegated command, for the front-end to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub command: String,
    pub termination: Termination,
    pub output_len: usize,
    pub clipboard: ClipboardOutcome,
}

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank input; prompt again
    Idle,
    /// `exit` was entered
    Exit,
    ChangedDirectory(PathBuf),
    /// `cd` failed; the error displays as `cd: ...`
    DirectoryChangeFailed(CopyshellError),
    Executed(ExecutionReport),
}

impl DispatchOutcome {
    pub fn is_exit(&self) -> bool {
        matches!(self, DispatchOutcome::Exit)
    }
}

/// Routes input lines. One instance lives for the whole session.
pub struct Dispatcher {
    executor: Box<dyn CommandExecutor>,
    clipboard: Option<Box<dyn ClipboardSink>>,
}

impl Dispatcher {
    /// Creates a dispatcher with clipboard copying disabled.
    pub fn new(executor: Box<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            clipboard: None,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn clipboard_enabled(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Dispatches one line. Never fails: every error becomes an outcome.
    pub async fn dispatch(&mut self, line: &str, session: &mut Session) -> DispatchOutcome {
        match Command::parse(line) {
            Command::Empty => DispatchOutcome::Idle,
            Command::Exit => DispatchOutcome::Exit,
            Command::ChangeDirectory { target } => match session.change_dir(target) {
                Ok(cwd) => DispatchOutcome::ChangedDirectory(cwd.to_path_buf()),
                Err(e) => {
                    tracing::debug!("[Dispatcher] {}", e);
                    DispatchOutcome::DirectoryChangeFailed(e)
                }
            },
            command @ Command::External { name, raw } => {
                let exempt = command.is_clipboard_exempt();
                tracing::debug!("[Dispatcher] executing '{}' in {}", raw, session.cwd().display());

                let result = self.executor.execute(raw, session.cwd()).await;
                tracing::debug!(
                    "[Dispatcher] '{}' finished: {:?}, {} bytes captured",
                    name,
                    result.termination,
                    result.output.len()
                );

                let clipboard = if exempt {
                    ClipboardOutcome::Exempt
                } else {
                    self.copy_output(&result.output)
                };

                DispatchOutcome::Executed(ExecutionReport {
                    command: name.to_string(),
                    output_len: result.output.len(),
                    termination: result.termination,
                    clipboard,
                })
            }
        }
    }

    fn copy_output(&mut self, output: &[u8]) -> ClipboardOutcome {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return ClipboardOutcome::Disabled;
        };
        if output.is_empty() {
            return ClipboardOutcome::Empty;
        }

        let text = String::from_utf8_lossy(output);
        match clipboard.write_text(&text) {
            Ok(()) => ClipboardOutcome::Copied {
                bytes: output.len(),
            },
            Err(e) => {
                tracing::warn!("[Dispatcher] clipboard write failed: {}", e);
                ClipboardOutcome::Failed(e)
            }
        }
    }
}
