//! Keeps termination-requesting signals from killing the shell.
//!
//! While a child runs, Ctrl-C reaches the whole foreground process group.
//! The child gets the default disposition back at exec and stops; this
//! process only logs the signal and keeps its loop alive.

use tokio::task::JoinHandle;

/// Spawns the listener task. Must be called from inside a tokio runtime.
///
/// Installing the handlers happens before this returns, so a signal that
/// arrives right after the call is already ignored.
#[cfg(unix)]
pub fn spawn_interrupt_listener() -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(()) = interrupt.recv() => {
                    tracing::debug!("[Signals] SIGINT ignored");
                }
                Some(()) = terminate.recv() => {
                    tracing::debug!("[Signals] SIGTERM ignored");
                }
                else => break,
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_interrupt_listener() -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("[Signals] Ctrl-C ignored");
        }
    }))
}
