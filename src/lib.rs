//! # Introduction
//!
//! Rollcall keeps a small database of student records (id, name, age, major,
//! and up to four semesters of subject marks) in a single CSV file, and edits
//! it through an interactive menu, either full-screen with
//! [ratatui](https://docs.rs/ratatui) or as plain line-by-line prompts.
//!
//! ## Data flow
//!
//! ```text
//! CSV file → storage → RecordStore → session (menu) → storage → CSV file
//!                          ↑               ↓
//!                        query        Prompter (console | ui)
//! ```
//!
//! 1. [`records`]: the [`records::Student`] record with its semester slots and
//!    the bounded, insertion-ordered [`records::RecordStore`].
//! 2. [`codec`]: the nested `MarksData` field format, with lenient decoding.
//! 3. [`storage`]: whole-file load and save, skipping malformed lines.
//! 4. [`query`]: id-prefix, exact-id and subject-mark searches.
//! 5. [`session`]: menu workflows behind the [`session::Prompter`] trait.
//! 6. [`ui`]: ratatui front end; not part of the stable library API.
//!
//! [`config`] and [`logging`] hold the binary's command-line flags and its
//! `log` backend.
//!
//! ## Marks format
//!
//! ```text
//! S1:Math=90,Physics=75;S3:Art=60
//! ```

pub mod codec;
pub mod config;
pub mod logging;
pub mod query;
pub mod records;
pub mod session;
pub mod storage;
pub mod ui;
