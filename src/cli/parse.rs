//! CLI parse: clap types for nlsh. No behavior beyond joining the query.

use crate::error::NlshError;
use clap::Parser;
use std::path::PathBuf;

/// nlsh - turn a plain-language request into a shell command
#[derive(Debug, Parser)]
#[command(name = "nlsh")]
#[command(about = "Turn a natural-language request into a shell command using a local model")]
pub struct Cli {
    /// What you want to do, in plain words
    #[arg(
        value_name = "QUERY",
        required_unless_present = "print_config",
        trailing_var_arg = true
    )]
    pub query: Vec<String>,

    /// Configuration file path (replaces the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the local model server (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Echo the raw model output to stderr
    #[arg(long)]
    pub show_raw: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The natural-language query: all trailing words joined by spaces.
    pub fn query_text(&self) -> Result<String, NlshError> {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            return Err(NlshError::MissingQuery);
        }
        Ok(query)
    }
}
