//! Error types for the nlsh pipeline.
//!
//! Normalization never fails; everything here originates in an external
//! collaborator (context collector, model endpoint, terminal, shell) or in
//! configuration, and terminates the run.

use thiserror::Error;

/// Errors surfaced to the top level of a run
#[derive(Debug, Error)]
pub enum NlshError {
    #[error("No query given. Usage: nlsh <what you want to do>")]
    MissingQuery,

    #[error("Failed to collect system context: {0}")]
    ContextCollection(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("No commands generated from the model output")]
    NoCommands,

    #[error("Failed to read selection: {0}")]
    Selection(String),

    #[error("Failed to execute command: {0}")]
    Execution(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for NlshError {
    fn from(err: config::ConfigError) -> Self {
        NlshError::ConfigError(err.to_string())
    }
}
