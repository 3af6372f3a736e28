//! Error types for record validation and store operations
//!
//! Every store operation reports failure through [`RecordError`]. None of
//! these are fatal: the caller reports them and the store is left unchanged.

use thiserror::Error;

/// Errors raised by validation and by [`RecordStore`](super::store::RecordStore) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The id is empty, too long or contains something other than digits
    #[error("invalid student id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    /// Another record already uses this id
    #[error("student id '{0}' already exists")]
    DuplicateId(String),

    /// The store holds as many records as it can
    #[error("database is full ({capacity} students)")]
    StoreFull { capacity: usize },

    /// No record with this id
    #[error("student with id '{0}' not found")]
    NotFound(String),

    /// A required text field was empty
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("age {0} is out of range")]
    AgeOutOfRange(u32),

    #[error("semester {0} is out of range")]
    SemesterOutOfRange(u8),

    /// Subject name is empty or longer than the allowed length
    #[error("invalid subject name '{0}'")]
    InvalidSubjectName(String),

    #[error("mark {0} is out of range")]
    MarkOutOfRange(u8),

    /// The semester already holds the maximum number of subjects
    #[error("cannot add more subjects to semester {semester} (limit: {limit})")]
    SemesterFull { semester: u8, limit: usize },

    /// No subject with this exact name in the semester
    #[error("subject '{subject}' not found in semester {semester}")]
    SubjectNotFound { semester: u8, subject: String },

    /// Search prefix is empty or not digits only
    #[error("invalid id prefix '{0}'")]
    InvalidPrefix(String),
}

/// A convenience `Result` alias for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
