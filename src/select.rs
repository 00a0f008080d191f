//! Selection prompt
//!
//! Renders the numbered menu and reads the user's choice. Only an integer in
//! `[1, N]` or the quit sentinel `q` is accepted; anything else is reported
//! and the prompt repeats.

use crate::error::NlshError;
use crate::types::CandidateList;
use std::io::{BufRead, Write};

pub const SELECTION_PROMPT: &str = "Select the command number to execute (or q to quit)";
pub const QUIT_SENTINEL: &str = "q";

/// Result of parsing one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the candidate list
    Index(usize),
    Quit,
    Invalid(String),
}

/// Final decision returned by a [`Selector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Run(usize),
    Quit,
}

/// Parse a line typed at the selection prompt for a list of `count` entries.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case(QUIT_SENTINEL) {
        return Selection::Quit;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Index(n - 1),
        Ok(_) => Selection::Invalid(format!(
            "Invalid selection: choose a number between 1 and {}.",
            count
        )),
        Err(_) => Selection::Invalid(format!(
            "Invalid input '{}': enter a number or {} to quit.",
            input, QUIT_SENTINEL
        )),
    }
}

/// Render the numbered menu, one `N) command` line per candidate.
pub fn render_menu(candidates: &CandidateList) -> String {
    let mut menu = String::from("Available commands:\n");
    for (idx, candidate) in candidates.iter().enumerate() {
        menu.push_str(&format!("{}) {}\n", idx + 1, candidate.command));
    }
    menu
}

/// Source of the user's choice
pub trait Selector {
    fn choose(&mut self, candidates: &CandidateList) -> Result<Choice, NlshError>;
}

/// Interactive selector for a terminal, backed by `dialoguer`.
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn choose(&mut self, candidates: &CandidateList) -> Result<Choice, NlshError> {
        use dialoguer::Input;

        let count = candidates.len();
        let answer = Input::<String>::new()
            .with_prompt(SELECTION_PROMPT)
            .validate_with(|input: &String| -> Result<(), String> {
                match parse_selection(input, count) {
                    Selection::Invalid(reason) => Err(reason),
                    _ => Ok(()),
                }
            })
            .interact_text()
            .map_err(|e| NlshError::Selection(format!("Failed to get user input: {}", e)))?;

        match parse_selection(&answer, count) {
            Selection::Index(idx) => Ok(Choice::Run(idx)),
            _ => Ok(Choice::Quit),
        }
    }
}

/// Line-oriented selector over any reader/writer pair. Used when stdin is
/// not a terminal. End of input counts as quitting.
pub struct LineSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Selector for LineSelector<R, W> {
    fn choose(&mut self, candidates: &CandidateList) -> Result<Choice, NlshError> {
        loop {
            write!(self.output, "{}: ", SELECTION_PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Choice::Quit);
            }

            match parse_selection(&line, candidates.len()) {
                Selection::Index(idx) => return Ok(Choice::Run(idx)),
                Selection::Quit => return Ok(Choice::Quit),
                Selection::Invalid(reason) => writeln!(self.output, "{}", reason)?,
            }
        }
    }
}
