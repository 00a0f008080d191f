//! Response Normalizer
//!
//! Turns whatever text the model returned into a [`CandidateList`]. Stages are
//! tried in order and the first one that applies wins:
//!
//! 1. structured: the first balanced `[...]` in the text parses as a JSON array;
//! 2. plain text: the whole trimmed response becomes one candidate;
//! 3. empty: nothing but whitespace came back.
//!
//! Blank commands are dropped afterwards regardless of stage. This module has no
//! side effects and never fails; callers decide what to log.

use crate::types::{CandidateList, CommandCandidate};
use serde_json::{Map, Value};

/// Which stage produced the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationStage {
    Structured,
    PlainText,
    Empty,
}

impl NormalizationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationStage::Structured => "structured",
            NormalizationStage::PlainText => "plain_text",
            NormalizationStage::Empty => "empty",
        }
    }
}

/// Normalizer result together with the stage that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub candidates: CandidateList,
    pub stage: NormalizationStage,
}

/// Per-element interpretation of a parsed JSON array
#[derive(Debug, Clone, PartialEq)]
enum ElementShape {
    StringCommand(String),
    ObjectCommand {
        command: String,
        extra: Map<String, Value>,
    },
    Unrecognized,
}

impl From<Value> for ElementShape {
    fn from(value: Value) -> Self {
        match value {
            Value::String(command) => ElementShape::StringCommand(command),
            Value::Object(mut fields) => match fields.remove("command") {
                Some(Value::String(command)) => ElementShape::ObjectCommand {
                    command,
                    extra: fields,
                },
                _ => ElementShape::Unrecognized,
            },
            _ => ElementShape::Unrecognized,
        }
    }
}

impl ElementShape {
    fn into_candidate(self) -> Option<CommandCandidate> {
        match self {
            ElementShape::StringCommand(command) => Some(CommandCandidate::new(command)),
            ElementShape::ObjectCommand { command, extra } => {
                Some(CommandCandidate::with_extra(command, extra))
            }
            ElementShape::Unrecognized => None,
        }
    }
}

/// Normalize a raw model response into a candidate list.
pub fn normalize(raw: &str) -> CandidateList {
    normalize_detailed(raw).candidates
}

/// Normalize a raw model response, also reporting which stage won.
pub fn normalize_detailed(raw: &str) -> Normalized {
    if let Some(candidates) = extract_structured(raw) {
        return Normalized {
            candidates: CandidateList::from_candidates(candidates),
            stage: NormalizationStage::Structured,
        };
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized {
            candidates: CandidateList::empty(),
            stage: NormalizationStage::Empty,
        };
    }

    Normalized {
        candidates: CandidateList::from_candidates([CommandCandidate::new(trimmed)]),
        stage: NormalizationStage::PlainText,
    }
}

/// Stage 1: parse the first balanced array. `None` when there is no balanced
/// array or it is not valid JSON.
fn extract_structured(raw: &str) -> Option<Vec<CommandCandidate>> {
    let fragment = find_json_array(raw)?;
    match serde_json::from_str::<Value>(fragment).ok()? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(ElementShape::from)
                .filter_map(ElementShape::into_candidate)
                .collect(),
        ),
        _ => None,
    }
}

/// Locate the first `[` and its matching `]`.
///
/// Brackets inside double-quoted string literals do not count, and a
/// backslash escapes the next character inside a literal. Returns `None` if
/// the opening bracket is never closed.
pub fn find_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&raw[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
