//! CLI route: run context and the pipeline
//! (prompt → model → normalizer → selection → execution).

use crate::config::NlshConfig;
use crate::error::NlshError;
use crate::exec::{run_shell, ExecutionOutcome};
use crate::normalize::normalize_detailed;
use crate::prompt::build_prompt;
use crate::provider::{ModelClient, OllamaClient};
use crate::select::{render_menu, Choice, Selector};
use crate::types::{CandidateList, SystemContext};
use owo_colors::OwoColorize;
use std::io::Write;
use tracing::{debug, info, warn};

/// How a run ended, when it did not end in an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    Executed(ExecutionOutcome),
}

/// Runtime context for one invocation: effective config and the model client.
pub struct RunContext {
    config: NlshConfig,
    client: Box<dyn ModelClient>,
    show_raw: bool,
    color: bool,
}

impl RunContext {
    /// Create a run context talking to the configured Ollama endpoint.
    pub fn new(config: NlshConfig) -> Result<Self, NlshError> {
        config.ensure_valid()?;
        let client = OllamaClient::new(&config.provider)?;
        Ok(Self::with_client(config, Box::new(client)))
    }

    /// Create a run context around any model client.
    pub fn with_client(config: NlshConfig, client: Box<dyn ModelClient>) -> Self {
        Self {
            config,
            client,
            show_raw: false,
            color: false,
        }
    }

    /// Echo the raw model output to stderr before normalizing it.
    pub fn show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    /// Color the final success/failure line.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &NlshConfig {
        &self.config
    }

    /// Ask the model for commands and normalize its answer. An empty result is
    /// reported as [`NlshError::NoCommands`].
    pub fn generate(
        &self,
        query: &str,
        context: &SystemContext,
    ) -> Result<CandidateList, NlshError> {
        let prompt = build_prompt(query, context);
        info!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            "Querying model"
        );

        let rt = build_runtime()?;
        let raw = rt.block_on(self.client.complete(&prompt))?;

        debug!(raw_output = %raw, "Received model output");
        if self.show_raw {
            eprintln!("Raw output:\n{}", raw);
        }

        let normalized = normalize_detailed(&raw);
        info!(
            stage = normalized.stage.as_str(),
            candidates = normalized.candidates.len(),
            "Normalized model output"
        );
        if normalized.candidates.is_empty() {
            warn!("Model output contained no usable commands");
            return Err(NlshError::NoCommands);
        }
        Ok(normalized.candidates)
    }

    /// Run the whole pipeline, writing the menu and result lines to `out`.
    pub fn run<W: Write>(
        &self,
        query: &str,
        context: &SystemContext,
        selector: &mut dyn Selector,
        out: &mut W,
    ) -> Result<RunOutcome, NlshError> {
        let candidates = self.generate(query, context)?;

        write!(out, "{}", render_menu(&candidates))?;
        out.flush()?;

        let index = match selector.choose(&candidates)? {
            Choice::Quit => {
                info!("User quit at selection prompt");
                return Ok(RunOutcome::Quit);
            }
            Choice::Run(index) => index,
        };
        let candidate = candidates.get(index).ok_or_else(|| {
            NlshError::Selection(format!("Selection {} is out of range", index + 1))
        })?;

        writeln!(out, "Executing: {}", candidate.command)?;
        out.flush()?;
        let outcome = run_shell(&candidate.command)?;

        let message = outcome.message();
        match (self.color, outcome.success()) {
            (true, true) => writeln!(out, "{}", message.green())?,
            (true, false) => writeln!(out, "{}", message.red())?,
            (false, _) => writeln!(out, "{}", message)?,
        }

        Ok(RunOutcome::Executed(outcome))
    }
}

/// Single-threaded runtime for the one blocking model call.
fn build_runtime() -> Result<tokio::runtime::Runtime, NlshError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| NlshError::ProviderError(format!("Failed to create runtime: {}", e)))
}
