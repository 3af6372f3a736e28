//! Full-screen interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: screen state, keyboard handling, and the [`Prompter`] implementation
//!   that lets the menu session drive the screen
//! - **[`panes`]**: stateless render functions for each visible pane (records table,
//!   transcript, input line, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`App`]: wrap a ratatui `Terminal` in it and hand it to a
//! [`Session`](crate::session::Session) as the prompter.
//!
//! [`Prompter`]: crate::session::Prompter

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
