//! System clipboard sink backed by `arboard`.

use copyshell_core::{ClipboardSink, CopyshellError, Result};

/// Writes text to the OS clipboard.
///
/// The connection is opened on first use and then kept for the whole
/// session: on X11 the copied text is served by the process that owns the
/// selection, so dropping the handle after each write would lose it.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn connection(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| {
                CopyshellError::clipboard(format!("cannot access clipboard: {}", e))
            })?;
            tracing::debug!("[Clipboard] connected");
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| CopyshellError::internal("clipboard connection missing"))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self.connection()?;
        match clipboard.set_text(text) {
            Ok(()) => {
                tracing::debug!("[Clipboard] copied {} bytes", text.len());
                Ok(())
            }
            Err(e) => {
                // Reconnect next time; the display may have gone away
                self.inner = None;
                Err(CopyshellError::clipboard(e.to_string()))
            }
        }
    }
}
