//! Execution contracts shared between the dispatcher and the pipeline.

use std::path::Path;

use async_trait::async_trait;

/// How a child run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Exited normally with this status code
    Exited(i32),
    /// Killed by a signal (the number, when the platform reports one)
    Signaled(Option<i32>),
    /// The interpreter never started
    SpawnFailed(String),
}

/// Captured result of one command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Combined stdout/stderr in write order
    pub output: Vec<u8>,
    pub termination: Termination,
}

impl ExecutionResult {
    pub fn new(output: Vec<u8>, termination: Termination) -> Self {
        Self {
            output,
            termination,
        }
    }

    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self {
            output: Vec::new(),
            termination: Termination::SpawnFailed(message.into()),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.termination, Termination::Exited(0))
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self.termination {
            Termination::Exited(code) => Some(code),
            _ => None,
        }
    }
}

/// Runs a raw command line through the system shell.
///
/// Implementations mirror the output to the terminal while it is produced
/// and return the same bytes in the result. Failures are reported through
/// [`Termination`], never as an error.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, raw_line: &str, cwd: &Path) -> ExecutionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_and_exit_code() {
        let ok = ExecutionResult::new(b"hi\n".to_vec(), Termination::Exited(0));
        assert!(ok.success());
        assert_eq!(ok.exit_code(), Some(0));

        let failed = ExecutionResult::new(Vec::new(), Termination::Exited(2));
        assert!(!failed.success());

        let killed = ExecutionResult::new(Vec::new(), Termination::Signaled(Some(9)));
        assert_eq!(killed.exit_code(), None);
    }

    #[test]
    fn test_spawn_failed_has_no_output() {
        let result = ExecutionResult::spawn_failed("No such file or directory");
        assert!(result.output.is_empty());
        assert!(!result.success());
    }
}
