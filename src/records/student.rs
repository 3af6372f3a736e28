//! Student records and their per-semester marks
//!
//! A [`Student`] always carries exactly [`SEMESTER_COUNT`] semester slots,
//! indexed by `semester_number - 1`. A slot that was never entered is
//! inactive; an active slot may still hold zero subjects.

use super::constants::{
    MAX_AGE, MAX_ID_LENGTH, MAX_MARK, MAX_SUBJECTS_PER_SEMESTER, MAX_SUBJECT_NAME_LENGTH, MIN_AGE,
    SEMESTER_COUNT,
};
use super::errors::{RecordError, Result};

/// A single subject and the mark obtained in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMark {
    pub name: String,
    pub mark: u8,
}

/// One semester slot of a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterRecord {
    number: u8,
    subjects: Vec<SubjectMark>,
    active: bool,
}

impl SemesterRecord {
    /// Create an inactive, empty slot for the given semester number
    pub(crate) fn new(number: u8) -> Self {
        SemesterRecord {
            number,
            subjects: Vec::with_capacity(MAX_SUBJECTS_PER_SEMESTER),
            active: false,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn subjects(&self) -> &[SubjectMark] {
        &self.subjects
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Active and holding at least one subject
    pub fn has_subjects(&self) -> bool {
        self.active && !self.subjects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.subjects.len() >= MAX_SUBJECTS_PER_SEMESTER
    }

    /// Find a subject by exact, case-sensitive name
    pub fn subject(&self, name: &str) -> Option<&SubjectMark> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Mark the semester as entered. Existing subjects are kept.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Append a subject, activating the semester.
    ///
    /// Fails without touching the subject list when the semester is full or
    /// the name/mark are invalid.
    pub fn add_subject(&mut self, name: &str, mark: u8) -> Result<()> {
        if self.is_full() {
            return Err(RecordError::SemesterFull {
                semester: self.number,
                limit: MAX_SUBJECTS_PER_SEMESTER,
            });
        }
        validate_subject_name(name)?;
        validate_mark(mark)?;

        self.active = true;
        self.subjects.push(SubjectMark {
            name: name.to_string(),
            mark,
        });
        Ok(())
    }

    /// Replace the mark of an existing subject
    pub fn update_mark(&mut self, name: &str, mark: u8) -> Result<()> {
        validate_mark(mark)?;
        let number = self.number;
        match self.subjects.iter_mut().find(|s| s.name == name) {
            Some(subject) => {
                subject.mark = mark;
                Ok(())
            }
            None => Err(RecordError::SubjectNotFound {
                semester: number,
                subject: name.to_string(),
            }),
        }
    }

    /// Return the slot to its never-entered state
    pub fn reset(&mut self) {
        self.subjects.clear();
        self.active = false;
    }
}

/// A student and the marks recorded for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: String,
    name: String,
    age: u32,
    major: String,
    semesters: [SemesterRecord; SEMESTER_COUNT],
}

impl Student {
    /// Create a fully validated student with no marks recorded
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        major: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();
        let major = major.into();

        validate_id(&id)?;
        validate_non_empty("name", &name)?;
        validate_age(age)?;
        validate_non_empty("major", &major)?;

        Ok(Self::with_fields(id, name, age, major))
    }

    /// Build a student read back from storage.
    ///
    /// Only the id is checked here; storage accepts any positive age and
    /// whatever name and major were written.
    pub(crate) fn from_stored(id: String, name: String, age: u32, major: String) -> Result<Self> {
        validate_id(&id)?;
        Ok(Self::with_fields(id, name, age, major))
    }

    fn with_fields(id: String, name: String, age: u32, major: String) -> Self {
        Student {
            id,
            name,
            age,
            major,
            semesters: std::array::from_fn(|i| SemesterRecord::new(i as u8 + 1)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_non_empty("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: u32) -> Result<()> {
        validate_age(age)?;
        self.age = age;
        Ok(())
    }

    pub fn set_major(&mut self, major: impl Into<String>) -> Result<()> {
        let major = major.into();
        validate_non_empty("major", &major)?;
        self.major = major;
        Ok(())
    }

    pub fn semesters(&self) -> &[SemesterRecord; SEMESTER_COUNT] {
        &self.semesters
    }

    /// Get a semester slot by its 1-based number
    pub fn semester(&self, number: u8) -> Result<&SemesterRecord> {
        let index = semester_index(number)?;
        Ok(&self.semesters[index])
    }

    /// Get a mutable semester slot by its 1-based number
    pub fn semester_mut(&mut self, number: u8) -> Result<&mut SemesterRecord> {
        let index = semester_index(number)?;
        Ok(&mut self.semesters[index])
    }

    /// True if any semester is active and holds subjects
    pub fn has_marks(&self) -> bool {
        self.semesters.iter().any(SemesterRecord::has_subjects)
    }

    /// True if any semester has been entered, with or without subjects
    pub fn has_active_semester(&self) -> bool {
        self.semesters.iter().any(SemesterRecord::is_active)
    }

    /// Reset every semester to inactive and empty
    pub fn clear_marks(&mut self) {
        for semester in &mut self.semesters {
            semester.reset();
        }
    }

    pub fn activate_semester(&mut self, number: u8) -> Result<()> {
        self.semester_mut(number)?.activate();
        Ok(())
    }

    pub fn add_subject(&mut self, semester: u8, name: &str, mark: u8) -> Result<()> {
        self.semester_mut(semester)?.add_subject(name, mark)
    }

    pub fn update_mark(&mut self, semester: u8, subject: &str, mark: u8) -> Result<()> {
        self.semester_mut(semester)?.update_mark(subject, mark)
    }
}

fn semester_index(number: u8) -> Result<usize> {
    if number == 0 || number as usize > SEMESTER_COUNT {
        return Err(RecordError::SemesterOutOfRange(number));
    }
    Ok(number as usize - 1)
}

/// True if `s` is non-empty and made only of ASCII digits
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check the digits-only, length-bounded id rule (uniqueness is the store's job)
pub fn validate_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        "cannot be empty"
    } else if !is_digits(id) {
        "must contain only digits"
    } else if id.len() > MAX_ID_LENGTH {
        "too long"
    } else {
        return Ok(());
    };
    Err(RecordError::InvalidId {
        id: id.to_string(),
        reason,
    })
}

pub fn validate_subject_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_SUBJECT_NAME_LENGTH {
        return Err(RecordError::InvalidSubjectName(name.to_string()));
    }
    Ok(())
}

pub fn validate_mark(mark: u8) -> Result<()> {
    if mark > MAX_MARK {
        return Err(RecordError::MarkOutOfRange(mark));
    }
    Ok(())
}

pub fn validate_age(age: u32) -> Result<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RecordError::AgeOutOfRange(age));
    }
    Ok(())
}

fn validate_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Student {
        Student::new("123", "Alice", 20, "CS").unwrap()
    }

    #[test]
    fn test_id_validation() {
        assert!(validate_id("0").is_ok());
        assert!(validate_id(&"9".repeat(MAX_ID_LENGTH)).is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("12a").is_err());
        assert!(validate_id("-12").is_err());
        assert!(validate_id(&"1".repeat(MAX_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_new_student_rejects_bad_fields() {
        assert_eq!(
            Student::new("1", "", 20, "CS"),
            Err(RecordError::EmptyField("name"))
        );
        assert_eq!(
            Student::new("1", "Bob", 4, "CS"),
            Err(RecordError::AgeOutOfRange(4))
        );
        assert_eq!(
            Student::new("1", "Bob", 20, ""),
            Err(RecordError::EmptyField("major"))
        );
    }

    #[test]
    fn test_semester_numbers_follow_slots() {
        let s = alice();
        for (i, semester) in s.semesters().iter().enumerate() {
            assert_eq!(semester.number() as usize, i + 1);
            assert!(!semester.is_active());
            assert!(semester.subjects().is_empty());
        }
        assert!(!s.has_marks());
    }

    #[test]
    fn test_add_subject_caps_at_five() {
        let mut s = alice();
        for i in 0..MAX_SUBJECTS_PER_SEMESTER {
            s.add_subject(2, &format!("Sub{}", i), 50).unwrap();
        }
        let before = s.semester(2).unwrap().clone();

        let err = s.add_subject(2, "Extra", 99).unwrap_err();
        assert_eq!(
            err,
            RecordError::SemesterFull {
                semester: 2,
                limit: MAX_SUBJECTS_PER_SEMESTER
            }
        );
        assert_eq!(s.semester(2).unwrap(), &before);
    }

    #[test]
    fn test_update_mark_is_case_sensitive() {
        let mut s = alice();
        s.add_subject(1, "Math", 60).unwrap();

        assert!(matches!(
            s.update_mark(1, "math", 70),
            Err(RecordError::SubjectNotFound { semester: 1, .. })
        ));
        s.update_mark(1, "Math", 70).unwrap();
        assert_eq!(s.semester(1).unwrap().subject("Math").unwrap().mark, 70);
    }

    #[test]
    fn test_activate_keeps_semester_empty() {
        let mut s = alice();
        s.activate_semester(3).unwrap();
        assert!(s.semester(3).unwrap().is_active());
        assert!(s.has_active_semester());
        assert!(!s.has_marks());
        assert_eq!(
            s.activate_semester(5),
            Err(RecordError::SemesterOutOfRange(5))
        );
    }

    #[test]
    fn test_subject_name_and_mark_limits() {
        let mut s = alice();
        let long = "x".repeat(MAX_SUBJECT_NAME_LENGTH + 1);
        assert!(s.add_subject(1, &long, 10).is_err());
        assert!(s.add_subject(1, "", 10).is_err());
        assert_eq!(
            s.add_subject(1, "Art", 101),
            Err(RecordError::MarkOutOfRange(101))
        );
        assert!(!s.semester(1).unwrap().is_active());
    }
}
