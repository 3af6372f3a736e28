//! Read-only searches over the record store
//!
//! - [`search`]: id prefix, exact id and subject/mark threshold searches
//!
//! Searches return borrowed records and never change the store.

pub mod search;

pub use search::{by_exact_id, by_id_prefix, by_subject_mark};
