//! Interactive menu workflows and the input collaborator they drive
//!
//! - [`prompt`]: the [`Prompter`] trait and its retrying input helpers
//! - [`console`]: [`ConsolePrompter`], line-oriented prompts over any reader/writer
//! - [`menu`]: [`Session`], the main menu and its add/list/search/update/delete/save flows
//! - [`report`]: text rendering of tables, details and marks
//!
//! # Input Model
//!
//! The workflows only see values that the prompter has already checked for
//! type and range; they apply the record rules (digits-only ids, uniqueness,
//! subject name length) themselves. The full-screen interface in
//! [`crate::ui`] is just another [`Prompter`].

pub mod console;
pub mod menu;
pub mod prompt;
pub mod report;

pub use console::ConsolePrompter;
pub use menu::{MenuChoice, Session};
pub use prompt::Prompter;

use std::io;
use thiserror::Error;

/// Errors that end an interactive session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The input source has no more lines
    #[error("input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A convenience `Result` alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
