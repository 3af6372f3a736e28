//! The scalar input collaborator
//!
//! Implementors provide raw line input and line output; the provided methods
//! layer the retry loops on top so every front end validates the same way.

use super::{Result, SessionError};
use crate::records::store::RecordStore;
use std::io;

/// Prompt shown when an answer is rejected and asked again
pub const RETRY_PROMPT: &str = "Retry: ";

/// Source of user input and sink for user-facing output
pub trait Prompter {
    /// Show `prompt` and read one line, without its line terminator.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Emit one line of output
    fn say(&mut self, line: &str);

    /// Called whenever the store may have changed
    fn refresh(&mut self, _store: &RecordStore) {}

    /// Like [`read_line`](Self::read_line), but end of input is an error
    fn next_line(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?.ok_or(SessionError::InputClosed)
    }

    /// Read a line, asking again until it is non-empty
    fn non_empty(&mut self, prompt: &str) -> Result<String> {
        let mut current = prompt;
        loop {
            let line = self.next_line(current)?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.say("Input cannot be empty. Please enter text.");
            current = RETRY_PROMPT;
        }
    }

    /// Read an integer in `min..=max`, asking again until one is given.
    ///
    /// Whitespace around the number is ignored.
    fn int_in_range(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
        let mut current = prompt;
        loop {
            let line = self.next_line(current)?;
            match line.trim().parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => self.say(&format!(
                    "Input out of range. Please enter an integer between {} and {}.",
                    min, max
                )),
                Err(_) => self.say("Invalid input. Please enter an integer."),
            }
            current = RETRY_PROMPT;
        }
    }

    /// Read exactly one character
    fn single_char(&mut self, prompt: &str) -> Result<char> {
        let mut current = prompt;
        loop {
            let line = self.next_line(current)?;
            let mut chars = line.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(c);
            }
            self.say("Invalid input. Please enter exactly one character.");
            current = RETRY_PROMPT;
        }
    }

    /// Read a one-character answer; `y` or `Y` means yes
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(matches!(self.single_char(prompt)?, 'y' | 'Y'))
    }
}
