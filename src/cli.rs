//! CLI domain: parse, route, and output only.
//! The route runs the pipeline stages in order; nothing flows back upstream.

mod output;
mod parse;
mod route;

pub use output::{
    exit_code_for, map_error, EXIT_COMMAND_FAILED, EXIT_SUCCESS, EXIT_TOOL_ERROR,
};
pub use parse::Cli;
pub use route::{RunContext, RunOutcome};
