//! Fan-out writer for child output.
//!
//! Every chunk read from the child is handed to each registered sink in
//! registration order, so the terminal and the capture buffer see exactly
//! the same bytes in exactly the same sequence.

use std::io::{self, Write};

/// Which child stream a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// A destination for output chunks.
pub trait OutputSink: Send {
    fn write_chunk(&mut self, stream: StreamKind, chunk: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Mirrors chunks to this process's own stdout/stderr.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for TerminalSink {
    fn write_chunk(&mut self, stream: StreamKind, chunk: &[u8]) -> io::Result<()> {
        // Flushed per chunk so the operator sees output as it is produced
        match stream {
            StreamKind::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(chunk)?;
                out.flush()
            }
            StreamKind::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(chunk)?;
                err.flush()
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()
    }
}

/// Accumulates both streams into one buffer, interleaved in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CaptureBuffer {
    bytes: Vec<u8>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl OutputSink for CaptureBuffer {
    fn write_chunk(&mut self, _stream: StreamKind, chunk: &[u8]) -> io::Result<()> {
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }
}

/// Forwards each chunk to every registered sink.
#[derive(Default)]
pub struct Tee<'a> {
    sinks: Vec<&'a mut dyn OutputSink>,
}

impl<'a> Tee<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sink(mut self, sink: &'a mut dyn OutputSink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl OutputSink for Tee<'_> {
    /// Every sink gets the chunk even if an earlier one fails; the first
    /// error is returned afterwards.
    fn write_chunk(&mut self, stream: StreamKind, chunk: &[u8]) -> io::Result<()> {
        let mut first_error = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.write_chunk(stream, chunk) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
