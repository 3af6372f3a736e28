//! Persistence of the record store as a line-oriented CSV file
//!
//! - [`csv`]: load and save of the whole store
//! - [`errors`]: [`StorageError`] for open/read/write failures
//!
//! # File Format
//!
//! ```text
//! ID,Name,Age,Major,MarksData
//! 123,Alice,20,CS,S1:Math=90
//! ```
//!
//! Fields are split on `,` with no quoting. The last field uses the grammar
//! of [`crate::codec::marks`]. Saves truncate and rewrite the whole file.

pub mod csv;
pub mod errors;

pub use csv::{load_into, load_store, read_from, save_store, write_to, LineRejection, LoadReport};
pub use errors::{Result, StorageError};
