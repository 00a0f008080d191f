//! Logging System
//!
//! Structured diagnostics using the `tracing` crate. Logging is off unless
//! enabled by `--verbose`, a `--log-*` flag, the `[logging]` config table, or
//! one of the `NLSH_LOG*` environment variables.
//! Output defaults to stderr so it never interleaves with the command menu.

use crate::error::NlshError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_FILE_NAME: &str = "nlsh.log";
const ENV_FILTER: &str = "NLSH_LOG";
const ENV_FORMAT: &str = "NLSH_LOG_FORMAT";
const ENV_OUTPUT: &str = "NLSH_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether any subscriber is installed
    #[serde(default)]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); resolved to the state dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputDestination {
    Stdout,
    Stderr,
    File,
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (NLSH_LOG, NLSH_LOG_FORMAT, NLSH_LOG_OUTPUT)
/// 2. CLI arguments, already folded into `config` by the binary
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), NlshError> {
    if !logging_requested(config, |key| std::env::var_os(key).is_some()) {
        return Ok(());
    }

    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let writer = match output {
        OutputDestination::Stdout => BoxMakeWriter::new(std::io::stdout),
        OutputDestination::Stderr => BoxMakeWriter::new(std::io::stderr),
        OutputDestination::File => {
            let path = resolve_log_file_path(config.file.clone())?;
            BoxMakeWriter::new(Mutex::new(open_log_file(&path)?))
        }
    };
    let use_color = config.color && output != OutputDestination::File;

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| NlshError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Whether a subscriber should be installed: enabled in config, or any
/// `NLSH_LOG*` variable is set.
fn logging_requested(config: &LoggingConfig, is_set: impl Fn(&str) -> bool) -> bool {
    config.enabled || [ENV_FILTER, ENV_FORMAT, ENV_OUTPUT].iter().any(|key| is_set(*key))
}

/// Resolve the log file path: configured path (`--log-file` is folded into
/// it), then `<state dir>/nlsh.log` (data-local dir where there is no state dir).
pub fn resolve_log_file_path(configured: Option<PathBuf>) -> Result<PathBuf, NlshError> {
    if let Some(path) = configured {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "nlsh").ok_or_else(|| {
        NlshError::ConfigError("Could not determine a home directory for the log file".to_string())
    })?;
    let dir = dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, NlshError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            NlshError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| NlshError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build the filter; NLSH_LOG takes precedence over the configured level.
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

fn determine_format(config: &LoggingConfig) -> Result<String, NlshError> {
    if let Ok(format) = std::env::var(ENV_FORMAT) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(NlshError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<OutputDestination, NlshError> {
    if let Ok(output) = std::env::var(ENV_OUTPUT) {
        return parse_output_destination(&output);
    }
    parse_output_destination(&config.output)
}

fn parse_output_destination(output: &str) -> Result<OutputDestination, NlshError> {
    match output {
        "stdout" => Ok(OutputDestination::Stdout),
        "stderr" => Ok(OutputDestination::Stderr),
        "file" => Ok(OutputDestination::File),
        _ => Err(NlshError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
