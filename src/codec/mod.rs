//! Text codec for nested marks data
//!
//! - [`marks`]: encode/decode of the `MarksData` CSV column
//!
//! # Reserved characters
//!
//! The database file has no quoting or escaping. A field containing one of
//! [`RESERVED_DELIMITERS`] will not survive a save/load cycle intact. The
//! format is kept as-is for compatibility with existing files; callers use
//! [`has_reserved_delimiter`] to warn about such values.

pub mod marks;

pub use marks::{decode, encode, MarksWarning};

/// Characters with structural meaning in the database file
pub const RESERVED_DELIMITERS: [char; 4] = [',', ';', ':', '='];

/// True if `value` contains a character the file format cannot carry
pub fn has_reserved_delimiter(value: &str) -> bool {
    value.contains(RESERVED_DELIMITERS)
}
