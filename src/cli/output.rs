//! CLI output: error mapping and exit codes.
//!
//! A command that ran and failed exits with [`EXIT_COMMAND_FAILED`]; every
//! failure of the tool itself exits with [`EXIT_TOOL_ERROR`], the same code
//! clap uses for usage errors.

use super::route::RunOutcome;
use crate::error::NlshError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_COMMAND_FAILED: i32 = 1;
pub const EXIT_TOOL_ERROR: i32 = 2;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &NlshError) -> String {
    match e {
        NlshError::ProviderRequestFailed(_) | NlshError::ProviderModelNotFound(_) => format!(
            "{}\nIs the local model server running? Check `provider.base_url` and `provider.model`.",
            e
        ),
        _ => e.to_string(),
    }
}

/// Process exit code for a finished run.
pub fn exit_code_for(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Quit => EXIT_SUCCESS,
        RunOutcome::Executed(execution) if execution.success() => EXIT_SUCCESS,
        RunOutcome::Executed(_) => EXIT_COMMAND_FAILED,
    }
}
