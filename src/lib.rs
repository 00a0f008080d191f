//! nlsh: Natural-Language Shell Helper
//!
//! Asks a locally hosted language model for shell commands that accomplish a
//! plain-language request, coerces whatever it answers into a list of
//! candidates, and lets the user pick one to run.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod logging;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod select;
pub mod types;

pub use error::NlshError;
pub use normalize::{normalize, normalize_detailed, NormalizationStage, Normalized};
pub use types::{CandidateList, CommandCandidate, SystemContext};
