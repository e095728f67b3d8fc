//! Execution pipeline: run one line through the system shell and tee its
//! output to the terminal and a capture buffer.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use copyshell_core::{CommandExecutor, CopyshellError, ExecutionResult, Termination};
use tokio::io::AsyncReadExt;
use tokio::process::{ChildStderr, ChildStdout, Command};

use crate::tee::{CaptureBuffer, OutputSink, StreamKind, Tee, TerminalSink};

const CHUNK_SIZE: usize = 8 * 1024;

/// Runs command lines through `<program> <args...> <line>`.
///
/// The whole line is passed as a single argument so the interpreter handles
/// pipes, redirection, globbing and quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellExecutor {
    program: String,
    args: Vec<String>,
}

impl ShellExecutor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `sh -c` on unix, `cmd /C` on Windows.
    pub fn system_default() -> Self {
        if cfg!(windows) {
            Self::new("cmd", vec!["/C".to_string()])
        } else {
            Self::new("sh", vec!["-c".to_string()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs `raw_line` in `cwd`, writing every output chunk into `tee`.
    ///
    /// Returns only after the child has exited and both of its output
    /// streams are fully drained.
    pub async fn run(&self, raw_line: &str, cwd: &Path, tee: &mut Tee<'_>) -> Termination {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(raw_line)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                let err = CopyshellError::spawn(raw_line, format!("{}: {}", self.program, e));
                tracing::warn!("[Pipeline] {}", err);
                return Termination::SpawnFailed(err.to_string());
            }
        };
        tracing::debug!("[Pipeline] spawned pid {:?} for '{}'", child.id(), raw_line);

        match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => drain(stdout, stderr, tee).await,
            _ => tracing::warn!("[Pipeline] child output pipes were not captured"),
        }
        if let Err(e) = tee.flush() {
            tracing::warn!("[Pipeline] flush failed: {}", e);
        }

        match child.wait().await {
            Ok(status) => {
                let termination = termination_from(status);
                tracing::debug!("[Pipeline] '{}' -> {:?}", raw_line, termination);
                termination
            }
            Err(e) => {
                tracing::warn!("[Pipeline] failed to wait for '{}': {}", raw_line, e);
                Termination::Signaled(None)
            }
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::system_default()
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, raw_line: &str, cwd: &Path) -> ExecutionResult {
        let mut terminal = TerminalSink::new();
        let mut capture = CaptureBuffer::new();
        let termination = {
            let mut tee = Tee::new()
                .with_sink(&mut terminal)
                .with_sink(&mut capture);
            self.run(raw_line, cwd, &mut tee).await
        };
        ExecutionResult::new(capture.into_bytes(), termination)
    }
}

/// Reads both pipes until EOF, forwarding chunks in the order they arrive.
async fn drain(mut stdout: ChildStdout, mut stderr: ChildStderr, tee: &mut Tee<'_>) {
    let mut out_buf = [0u8; CHUNK_SIZE];
    let mut err_buf = [0u8; CHUNK_SIZE];
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            read = stdout.read(&mut out_buf), if out_open => {
                out_open = forward(read, StreamKind::Stdout, &out_buf, tee);
            }
            read = stderr.read(&mut err_buf), if err_open => {
                err_open = forward(read, StreamKind::Stderr, &err_buf, tee);
            }
        }
    }
}

/// Hands one read result to the tee. Returns whether the stream is still open.
fn forward(
    read: std::io::Result<usize>,
    stream: StreamKind,
    buf: &[u8],
    tee: &mut Tee<'_>,
) -> bool {
    match read {
        Ok(0) => false,
        Ok(n) => {
            // A sink failing (closed terminal) must not stop the others
            if let Err(e) = tee.write_chunk(stream, &buf[..n]) {
                tracing::warn!("[Pipeline] {:?} sink write failed: {}", stream, e);
            }
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => true,
        Err(e) => {
            tracing::warn!("[Pipeline] reading {:?} failed: {}", stream, e);
            false
        }
    }
}

#[cfg(unix)]
fn termination_from(status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => Termination::Exited(code),
        None => Termination::Signaled(status.signal()),
    }
}

#[cfg(not(unix))]
fn termination_from(status: ExitStatus) -> Termination {
    match status.code() {
        Some(code) => Termination::Exited(code),
        None => Termination::Signaled(None),
    }
}
