//! Core data types flowing through the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Facts about the host, gathered once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemContext {
    pub os_name: String,
    pub os_version: String,
    pub kernel: String,
    pub arch: String,
    pub package_manager: String,
}

impl fmt::Display for SystemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OS: {} {}; Kernel: {}; Arch: {}; Package Manager: {}",
            self.os_name, self.os_version, self.kernel, self.arch, self.package_manager
        )
    }
}

/// A single shell command suggested to the user.
///
/// Fields other than `command` that came with an object-shaped element are kept
/// in `extra`; nothing downstream needs them to run the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandCandidate {
    pub command: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommandCandidate {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(command: impl Into<String>, extra: Map<String, Value>) -> Self {
        Self {
            command: command.into(),
            extra,
        }
    }

    /// Whether the command carries anything besides whitespace
    pub fn is_runnable(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// Ordered, immutable list of candidates.
///
/// Only constructible through [`CandidateList::from_candidates`], which drops
/// candidates whose command is empty or whitespace-only. Order and duplicates
/// are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateList {
    candidates: Vec<CommandCandidate>,
}

impl CandidateList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = CommandCandidate>,
    {
        Self {
            candidates: candidates
                .into_iter()
                .filter(CommandCandidate::is_runnable)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Zero-based lookup
    pub fn get(&self, index: usize) -> Option<&CommandCandidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandCandidate> {
        self.candidates.iter()
    }

    pub fn commands(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.command.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a CommandCandidate;
    type IntoIter = std::slice::Iter<'a, CommandCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
