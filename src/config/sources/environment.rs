//! Environment source: NLSH__PROVIDER__MODEL, NLSH__LOGGING__LEVEL, ...
//!
//! The double underscore separates nesting levels, so single-underscore
//! variables such as NLSH_LOG are left to the logging filter.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};

pub const ENV_PREFIX: &str = "NLSH";
pub const ENV_SEPARATOR: &str = "__";

/// Add the environment layer. `vars` replaces the process environment when given.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(vars),
    )
}
