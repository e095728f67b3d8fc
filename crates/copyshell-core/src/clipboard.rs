//! Clipboard sink abstraction.

use crate::error::Result;

/// Best-effort, write-only destination for captured output.
///
/// A failed write is reported to the operator and never retried.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}
