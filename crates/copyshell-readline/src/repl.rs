//! The read-dispatch loop.

use anyhow::{Context, Result};
use colored::Colorize;
use copyshell_core::{DispatchOutcome, Dispatcher, Session};
use copyshell_infrastructure::HistoryStore;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};

use crate::helper::ShellHelper;
use crate::prompt::Prompt;
use crate::render;

/// Consecutive read errors after which the loop gives up. Stops a spin when
/// the terminal has gone away without delivering EOF.
const MAX_CONSECUTIVE_READ_ERRORS: usize = 16;

/// What the loop does with one result from the line editor.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Record the line in history, then dispatch it
    Dispatch(String),
    /// Blank line: prompt again without touching history
    Reprompt,
    Interrupted,
    /// End of input; leave the loop
    Finish,
    /// Report the error; `give_up` once the error budget is spent
    ReadError { message: String, give_up: bool },
}

/// Counts consecutive read failures and classifies each editor result.
#[derive(Debug, Default)]
struct ReadTracker {
    consecutive_errors: usize,
}

impl ReadTracker {
    fn on_read(&mut self, result: rustyline::Result<String>) -> Step {
        match result {
            Ok(line) => {
                self.consecutive_errors = 0;
                if line.trim().is_empty() {
                    Step::Reprompt
                } else {
                    Step::Dispatch(line)
                }
            }
            Err(ReadlineError::Interrupted) => {
                self.consecutive_errors = 0;
                Step::Interrupted
            }
            Err(ReadlineError::Eof) => Step::Finish,
            Err(e) => {
                self.consecutive_errors += 1;
                Step::ReadError {
                    message: e.to_string(),
                    give_up: self.consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS,
                }
            }
        }
    }
}

/// History file writer that tells the operator once when saving stops working.
struct HistoryRecorder {
    store: HistoryStore,
    warned: bool,
}

impl HistoryRecorder {
    fn new(store: HistoryStore) -> Self {
        Self {
            store,
            warned: false,
        }
    }

    /// Appends `line`; returns a warning to show on the first failure only.
    fn append(&mut self, line: &str) -> Option<String> {
        let err = self.store.append(line).err()?;
        tracing::warn!("[Repl] {}", err);
        if self.warned {
            return None;
        }
        self.warned = true;
        Some(format!("Warning: {}; later commands may not be saved", err))
    }

    fn close(&mut self) {
        self.store.close();
    }
}

pub struct Repl {
    session: Session,
    dispatcher: Dispatcher,
    history: HistoryRecorder,
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl Repl {
    /// Sets up the line editor and seeds it with the stored history.
    pub fn new(session: Session, dispatcher: Dispatcher, history: HistoryStore) -> Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor: Editor<ShellHelper, DefaultHistory> =
            Editor::with_config(config).context("Failed to initialize line editor")?;
        editor.set_helper(Some(ShellHelper::new(&session)));

        let entries = history.load();
        tracing::debug!("[Repl] loaded {} history entries", entries.len());
        for entry in &entries {
            if let Err(e) = editor.add_history_entry(entry.as_str()) {
                tracing::warn!("[Repl] skipping history entry: {}", e);
            }
        }

        Ok(Self {
            session,
            dispatcher,
            history: HistoryRecorder::new(history),
            editor,
        })
    }

    /// Runs until `exit` or end of input.
    pub async fn run(&mut self) {
        let mut reads = ReadTracker::default();

        loop {
            let prompt = Prompt::for_session(&self.session);
            if let Some(helper) = self.editor.helper_mut() {
                helper.sync(&self.session, &prompt);
            }

            match reads.on_read(self.editor.readline(&prompt.plain())) {
                Step::Dispatch(line) => {
                    self.record(&line);

                    let outcome = self.dispatcher.dispatch(&line, &mut self.session).await;
                    if let DispatchOutcome::Executed(report) = &outcome {
                        tracing::info!(
                            "[Repl] {} -> {:?}, clipboard {:?}",
                            report.command,
                            report.termination,
                            report.clipboard
                        );
                    }
                    for notice in render::notices(&outcome) {
                        notice.print();
                    }
                    if outcome.is_exit() {
                        break;
                    }
                }
                Step::Reprompt => {}
                Step::Interrupted => {
                    println!("{}", "^C (type 'exit' to quit)".bright_black());
                }
                Step::Finish => {
                    println!();
                    break;
                }
                Step::ReadError { message, give_up } => {
                    tracing::error!("[Repl] read failed: {}", message);
                    eprintln!("{}", format!("Error reading input: {}", message).red());
                    if give_up {
                        eprintln!("{}", "Too many input errors, exiting.".red());
                        break;
                    }
                }
            }
        }

        self.history.close();
        tracing::info!("[Repl] session ended");
    }

    fn record(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!("[Repl] Failed to add history entry: {}", e);
        }
        if let Some(warning) = self.history.append(line) {
            eprintln!("{}", warning.yellow());
        }
    }
}
