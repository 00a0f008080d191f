//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the config file, then the
//! environment. CLI flags are applied on the deserialized record afterwards.

use crate::provider::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.base_url", DEFAULT_BASE_URL)?
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("provider.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS)?
        .set_default("provider.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)
}
