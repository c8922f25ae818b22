//! Operator input
//!
//! Every interactive prompt goes through an [`InputProvider`] so the
//! calibration and confirmation loops can be driven from a terminal or from
//! a script of canned answers.

use dotmatrix_core::{thread_safe_vec, ThreadSafeVec};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of operator responses
pub trait InputProvider: Send {
    /// Show `prompt` and read one response
    ///
    /// Returns `None` once the source is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Reads responses from standard input
///
/// Prompts are printed to stdout. Blank lines are skipped and responses
/// are trimmed.
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    /// Create a reader over the process's standard input
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for StdinInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        println!("{}", prompt);
        let _ = io::stdout().flush();

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            match lines.next()? {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Some(line.to_string());
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read from stdin: {}", e);
                    return None;
                }
            }
        }
    }
}

/// Replays a fixed list of responses
///
/// The prompts shown are recorded and can be inspected through a cloned
/// handle from [`ScriptedInput::prompts`].
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    responses: VecDeque<String>,
    prompts: ThreadSafeVec<String>,
}

impl ScriptedInput {
    /// Create a script from responses in the order they will be given
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            prompts: thread_safe_vec(),
        }
    }

    /// Shared handle to the prompts shown so far
    pub fn prompts(&self) -> ThreadSafeVec<String> {
        self.prompts.clone()
    }

    /// Responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl InputProvider for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.lock().push(prompt.to_string());
        self.responses.pop_front()
    }
}

/// Operator decision parsed from the first character of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// `Y` or `y`
    Accept,
    /// `N` or `n`
    Decline,
    /// `R` or `r`
    Repeat,
    /// Anything else
    Other,
}

impl Decision {
    /// Parse a response; leading whitespace is ignored
    pub fn parse(response: &str) -> Self {
        match response.trim_start().chars().next() {
            Some('Y' | 'y') => Decision::Accept,
            Some('N' | 'n') => Decision::Decline,
            Some('R' | 'r') => Decision::Repeat,
            _ => Decision::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_uses_first_character() {
        assert_eq!(Decision::parse("Y"), Decision::Accept);
        assert_eq!(Decision::parse("yes"), Decision::Accept);
        assert_eq!(Decision::parse("no thanks"), Decision::Decline);
        assert_eq!(Decision::parse("r"), Decision::Repeat);
        assert_eq!(Decision::parse("-190"), Decision::Other);
        assert_eq!(Decision::parse(""), Decision::Other);
    }

    #[test]
    fn test_scripted_input_records_prompts() {
        let mut input = ScriptedInput::new(["a", "b"]);
        let prompts = input.prompts();

        assert_eq!(input.read_line("first").as_deref(), Some("a"));
        assert_eq!(input.read_line("second").as_deref(), Some("b"));
        assert_eq!(input.read_line("third"), None);

        assert_eq!(*prompts.lock(), vec!["first", "second", "third"]);
        assert_eq!(input.remaining(), 0);
    }
}
