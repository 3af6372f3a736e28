//! Student record model and the in-memory record store
//!
//! This module provides the core data model:
//! - [`student`]: [`Student`], its four [`SemesterRecord`] slots and their [`SubjectMark`]s
//! - [`store`]: [`RecordStore`], the bounded ordered collection with CRUD operations
//! - [`errors`]: [`RecordError`] for validation and store failures
//! - [`constants`]: capacity and field limits
//!
//! # Ownership
//!
//! A [`Student`] owns its semesters by value and each semester owns its
//! subjects, so dropping or replacing a student releases everything below it.
//! The store owns its students in a `Vec`; deleting one shifts the survivors
//! down and keeps live records contiguous.

pub mod constants;
pub mod errors;
pub mod store;
pub mod student;

pub use errors::{RecordError, Result};
pub use store::{FieldUpdate, MarksEdit, RecordStore};
pub use student::{SemesterRecord, Student, SubjectMark};
