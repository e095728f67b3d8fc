//! Domain layer of Copyshell: session state, path completion, command
//! classification and dispatch.
//!
//! Nothing in this crate writes to the terminal or touches the real
//! clipboard. Those live behind [`CommandExecutor`] and [`ClipboardSink`].

pub mod clipboard;
pub mod command;
pub mod completer;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod session;

pub use clipboard::ClipboardSink;
pub use command::Command;
pub use completer::{CompletionCandidate, PathCompleter};
pub use dispatcher::{ClipboardOutcome, DispatchOutcome, Dispatcher, ExecutionReport};
pub use error::{CopyshellError, Result};
pub use execution::{CommandExecutor, ExecutionResult, Termination};
pub use session::{Identity, Session};
