//! Process execution of the chosen command through the host shell.

use crate::error::NlshError;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

const SHELL: &str = "sh";

/// How the executed command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code, or `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Message reported to the user after the command finishes
    pub fn message(&self) -> String {
        match self.exit_code {
            Some(0) => "Command executed successfully.".to_string(),
            Some(code) => format!("Command failed with exit code {}.", code),
            None => "Command was terminated by a signal.".to_string(),
        }
    }
}

impl From<ExitStatus> for ExecutionOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
        }
    }
}

/// Run `command` with `sh -c`, inheriting stdio, and wait for it.
pub fn run_shell(command: &str) -> Result<ExecutionOutcome, NlshError> {
    info!(command = %command, "Executing command");
    let status = Command::new(SHELL)
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|e| NlshError::Execution(format!("Could not spawn {}: {}", SHELL, e)))?;

    let outcome = ExecutionOutcome::from(status);
    debug!(exit_code = ?outcome.exit_code, "Command finished");
    Ok(outcome)
}
