//! Bounded, ordered in-memory store of student records
//!
//! Records keep insertion order. The only reordering operation is
//! [`RecordStore::delete`], which shifts later records down by one so that
//! live records always occupy a contiguous prefix.

use super::constants::MAX_STUDENTS;
use super::errors::{RecordError, Result};
use super::student::{validate_id, Student};
use log::debug;
use rustc_hash::FxHashSet;

/// A single-field change applied by [`RecordStore::update_field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Age(u32),
    Major(String),
    Marks(MarksEdit),
}

/// A change to one semester of a student's marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarksEdit {
    /// Mark a semester as entered without adding subjects
    ActivateSemester(u8),
    AddSubject { semester: u8, name: String, mark: u8 },
    UpdateMark {
        semester: u8,
        subject: String,
        mark: u8,
    },
}

/// The record store
#[derive(Debug, Clone)]
pub struct RecordStore {
    students: Vec<Student>,
    ids: FxHashSet<String>,
    capacity: usize,
}

impl RecordStore {
    /// Create an empty store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_STUDENTS)
    }

    /// Create an empty store holding at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        RecordStore {
            students: Vec::with_capacity(capacity),
            ids: FxHashSet::default(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.students.len() >= self.capacity
    }

    /// All live records in store order
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Append a new student at the end of the store.
    ///
    /// Rejected when the store is full, or when the id is invalid or already
    /// taken. On failure the store is unchanged. Returns the new index.
    pub fn create(&mut self, student: Student) -> Result<usize> {
        if self.is_full() {
            return Err(RecordError::StoreFull {
                capacity: self.capacity,
            });
        }
        validate_id(student.id())?;
        if self.contains_id(student.id()) {
            return Err(RecordError::DuplicateId(student.id().to_string()));
        }

        let index = self.students.len();
        debug!("Adding student {} at index {}", student.id(), index);
        self.ids.insert(student.id().to_string());
        self.students.push(student);
        Ok(index)
    }

    /// Index of the record with this id (linear scan)
    pub fn find_index(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Look up a record, reporting a missing id as [`RecordError::NotFound`]
    pub fn find(&self, id: &str) -> Result<&Student> {
        self.get(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    /// Replace exactly one field of the record with this id
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> Result<()> {
        let student = self.find_mut(id)?;
        match update {
            FieldUpdate::Name(name) => student.set_name(name),
            FieldUpdate::Age(age) => student.set_age(age),
            FieldUpdate::Major(major) => student.set_major(major),
            FieldUpdate::Marks(edit) => Self::apply_marks_edit(student, edit),
        }
    }

    /// Apply a marks edit to one semester of the record with this id
    pub fn edit_marks(&mut self, id: &str, edit: MarksEdit) -> Result<()> {
        let student = self.find_mut(id)?;
        Self::apply_marks_edit(student, edit)
    }

    fn apply_marks_edit(student: &mut Student, edit: MarksEdit) -> Result<()> {
        match edit {
            MarksEdit::ActivateSemester(semester) => student.activate_semester(semester),
            MarksEdit::AddSubject {
                semester,
                name,
                mark,
            } => student.add_subject(semester, &name, mark),
            MarksEdit::UpdateMark {
                semester,
                subject,
                mark,
            } => student.update_mark(semester, &subject, mark),
        }
    }

    /// Remove the record with this id and compact the store.
    ///
    /// Records after the removed one move down by one slot, keeping their
    /// relative order. Returns the removed record.
    pub fn delete(&mut self, id: &str) -> Result<Student> {
        let index = self
            .find_index(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;
        let removed = self.students.remove(index);
        self.ids.remove(removed.id());
        debug!("Deleted student {} from index {}", removed.id(), index);
        Ok(removed)
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.students.clear();
        self.ids.clear();
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}
