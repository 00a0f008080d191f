//! Config facade: builds the layered source stack and deserializes it.

use super::merge::merge_policy;
use super::sources::{environment, explicit_file, global_file};
use super::NlshConfig;
use crate::error::NlshError;
use std::path::Path;
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global config file and the process environment.
    pub fn load() -> Result<NlshConfig, NlshError> {
        let global = global_file::global_config_path();
        Self::load_from_sources(global.as_deref(), None, None)
    }

    /// Load with `path` in place of the global config file.
    pub fn load_from_file(path: &Path) -> Result<NlshConfig, NlshError> {
        Self::load_from_sources(None, Some(path), None)
    }

    /// Load from explicit sources.
    ///
    /// `explicit` replaces `global` when both are given. `env` replaces the
    /// process environment when given.
    pub fn load_from_sources(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<NlshConfig, NlshError> {
        let mut builder = merge_policy::builder_with_defaults()?;

        match (explicit, global) {
            (Some(path), _) => {
                debug!(config_path = %path.display(), "Loading explicit configuration file");
                builder = explicit_file::add_to_builder(builder, path)?;
            }
            (None, Some(path)) => {
                builder = global_file::add_to_builder(builder, path)?;
            }
            (None, None) => {}
        }

        builder = environment::add_to_builder(builder, env);

        let config: NlshConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
