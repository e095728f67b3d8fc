//! Copyshell: an interactive shell that copies every command's output to
//! the clipboard.

mod helper;
mod logging;
mod prompt;
mod render;
mod repl;

use anyhow::Result;
use colored::Colorize;
use copyshell_core::{Dispatcher, Session};
use copyshell_execution::{ShellExecutor, spawn_interrupt_listener};
use copyshell_infrastructure::{HistoryStore, SystemClipboard, current_identity, load_config};

use crate::repl::Repl;

#[tokio::main]
async fn main() -> Result<()> {
    // ===== Configuration & Logging =====
    let (config, config_error) = load_config();
    let _log_guard = logging::init(config.log_level.as_deref());
    if let Some(e) = config_error {
        eprintln!("{}", format!("Warning: {}; using defaults", e).yellow());
    }
    tracing::info!("[Bootstrap] starting copyshell {}", env!("CARGO_PKG_VERSION"));

    // Ctrl-C and SIGTERM reach the foreground child through the terminal;
    // the shell itself keeps running
    let listener = match spawn_interrupt_listener() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("[Bootstrap] signal handlers unavailable: {}", e);
            None
        }
    };

    // ===== Session =====
    let identity = current_identity();
    let cwd = std::env::current_dir().unwrap_or_else(|_| identity.home.clone());
    let session = Session::new(identity, cwd);
    tracing::info!(
        "[Bootstrap] {}@{} in {}",
        session.username(),
        session.hostname(),
        session.cwd().display()
    );

    let (history, history_error) = HistoryStore::open(session.history_path());
    if let Some(e) = history_error {
        eprintln!("{}", format!("Warning: {}", e).yellow());
    }

    // ===== Dispatcher =====
    let executor = ShellExecutor::new(config.shell.program.clone(), config.shell.args.clone());
    let mut dispatcher = Dispatcher::new(Box::new(executor));
    if config.clipboard.enabled {
        dispatcher = dispatcher.with_clipboard(Box::new(SystemClipboard::new()));
    } else {
        tracing::info!("[Bootstrap] clipboard copying disabled by config");
    }

    let mut repl = Repl::new(session, dispatcher, history)?;
    print_banner(config.clipboard.enabled);

    repl.run().await;

    if let Some(handle) = listener {
        handle.abort();
    }
    Ok(())
}

fn print_banner(clipboard_enabled: bool) {
    if clipboard_enabled {
        println!(
            "{}",
            "📋 Copyshell started. Every command output is copied to clipboard.".bright_green()
        );
    } else {
        println!(
            "{}",
            "📋 Copyshell started. Clipboard copying is disabled.".bright_yellow()
        );
    }
    println!("Type 'exit' to quit.");
    println!("{}", "-".repeat(50));
}
