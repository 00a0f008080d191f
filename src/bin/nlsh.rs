//! nlsh CLI Binary
//!
//! Command-line interface for the natural-language shell helper.

use clap::Parser;
use nlsh::cli::{exit_code_for, map_error, Cli, RunContext, RunOutcome, EXIT_SUCCESS, EXIT_TOOL_ERROR};
use nlsh::config::{ConfigLoader, NlshConfig};
use nlsh::logging::{init_logging, LoggingConfig};
use nlsh::select::{LineSelector, TerminalSelector};
use nlsh::NlshError;
use std::io::{self, IsTerminal};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_TOOL_ERROR);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_TOOL_ERROR);
    }

    info!("nlsh starting");

    if cli.print_config {
        match config.to_toml() {
            Ok(rendered) => {
                print!("{}", rendered);
                process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("{}", map_error(&e));
                process::exit(EXIT_TOOL_ERROR);
            }
        }
    }

    match run(&cli, config) {
        Ok(outcome) => {
            info!(?outcome, "Run finished");
            process::exit(exit_code_for(&outcome));
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_TOOL_ERROR);
        }
    }
}

fn run(cli: &Cli, config: NlshConfig) -> Result<RunOutcome, NlshError> {
    let query = cli.query_text()?;
    let context = nlsh::context::collect()?;
    info!(system_info = %context, query = %query, "Collected context");

    let run_context = RunContext::new(config)?
        .show_raw(cli.show_raw)
        .color(io::stdout().is_terminal());

    let mut out = io::stdout();
    if io::stdin().is_terminal() {
        run_context.run(&query, &context, &mut TerminalSelector, &mut out)
    } else {
        let mut selector = LineSelector::new(io::stdin().lock(), io::stdout());
        run_context.run(&query, &context, &mut selector, &mut out)
    }
}

/// Load configuration and apply the provider flags on top.
fn load_config(cli: &Cli) -> Result<NlshConfig, NlshError> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    apply_cli_overrides(&mut config, cli);
    Ok(config)
}

fn apply_cli_overrides(config: &mut NlshConfig, cli: &Cli) {
    if let Some(ref model) = cli.model {
        config.provider.model = model.clone();
    }
    if let Some(ref endpoint) = cli.endpoint {
        config.provider.base_url = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.provider.request_timeout_secs = timeout;
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, file_config: &LoggingConfig) -> LoggingConfig {
    let mut config = file_config.clone();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.enabled = true;
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.enabled = true;
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.enabled = true;
        config.output = "file".to_string();
        config.file = Some(file.clone());
    }

    config
}
