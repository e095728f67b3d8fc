//! Execution layer of Copyshell.
//!
//! - [`pipeline::ShellExecutor`]: runs a line through the system shell
//! - [`tee`]: fan-out of child output to the terminal and a capture buffer
//! - [`signals`]: background listener that swallows SIGINT/SIGTERM

pub mod pipeline;
pub mod signals;
pub mod tee;

pub use pipeline::ShellExecutor;
pub use signals::spawn_interrupt_listener;
pub use tee::{CaptureBuffer, OutputSink, StreamKind, Tee, TerminalSink};
