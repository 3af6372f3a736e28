//! Search operations

use crate::records::errors::{RecordError, Result};
use crate::records::store::RecordStore;
use crate::records::student::{is_digits, Student};

/// Students whose id starts with `prefix`, sorted by id in descending
/// string order (so `"9"` sorts before `"10"`).
///
/// The prefix must be non-empty and digits only.
pub fn by_id_prefix<'a>(store: &'a RecordStore, prefix: &str) -> Result<Vec<&'a Student>> {
    if !is_digits(prefix) {
        return Err(RecordError::InvalidPrefix(prefix.to_string()));
    }

    let mut matches: Vec<&Student> = store
        .iter()
        .filter(|s| s.id().starts_with(prefix))
        .collect();
    matches.sort_by(|a, b| b.id().cmp(a.id()));
    Ok(matches)
}

/// The student with exactly this id.
///
/// A non-digit id is reported as invalid rather than not found.
pub fn by_exact_id<'a>(store: &'a RecordStore, id: &str) -> Result<&'a Student> {
    if !is_digits(id) {
        return Err(RecordError::InvalidId {
            id: id.to_string(),
            reason: "must contain only digits",
        });
    }
    store.find(id)
}

/// Students with `subject` in `semester` at or above `min_mark`, in store order.
///
/// Only active semesters are considered and each student appears at most once.
pub fn by_subject_mark<'a>(
    store: &'a RecordStore,
    semester: u8,
    subject: &str,
    min_mark: u8,
) -> Vec<&'a Student> {
    store
        .iter()
        .filter(|student| {
            student
                .semester(semester)
                .ok()
                .filter(|sem| sem.is_active())
                .is_some_and(|sem| {
                    sem.subjects()
                        .iter()
                        .any(|m| m.name == subject && m.mark >= min_mark)
                })
        })
        .collect()
}
