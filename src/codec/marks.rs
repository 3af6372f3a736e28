//! Encoding and decoding of the `MarksData` field
//!
//! ```text
//! marks_field    := semester_block (";" semester_block)* | ""
//! semester_block := "S" digits ":" subject_list
//! subject_list   := subject_entry ("," subject_entry)* | ""
//! subject_entry  := subject_name "=" mark_digits
//! ```
//!
//! Decoding never fails as a whole. A malformed semester block is skipped, a
//! malformed subject entry is skipped, and subjects past the per-semester
//! limit are dropped; each of these is reported as a [`MarksWarning`].

use crate::records::constants::{MAX_MARK, MAX_SUBJECTS_PER_SEMESTER, MAX_SUBJECT_NAME_LENGTH};
use crate::records::student::{SemesterRecord, Student};
use log::warn;
use thiserror::Error;

const SEMESTER_SEPARATOR: char = ';';
const HEADER_SEPARATOR: char = ':';
const SUBJECT_SEPARATOR: char = ',';
const MARK_SEPARATOR: char = '=';
const SEMESTER_PREFIX: char = 'S';

/// A sub-token of the marks field that was skipped while decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarksWarning {
    /// The block did not split into exactly a header and a subject list
    #[error("malformed semester block in marks data: {0}")]
    MalformedBlock(String),

    /// The header is not `S` followed by a semester number in range
    #[error("invalid semester identifier in marks data: {0}")]
    InvalidSemesterHeader(String),

    /// The entry did not split into exactly a name and a mark
    #[error("malformed subject-mark pair in semester {semester}: {entry}")]
    MalformedEntry { semester: u8, entry: String },

    #[error("invalid, long or empty subject name in semester {semester}: {name}")]
    InvalidSubjectName { semester: u8, name: String },

    #[error("invalid mark for subject {subject} in semester {semester}: {raw}")]
    InvalidMark {
        semester: u8,
        subject: String,
        raw: String,
    },

    /// More entries than a semester can hold; the rest were ignored
    #[error("too many subjects for semester {semester} (limit {limit}), some ignored")]
    TooManySubjects { semester: u8, limit: usize },
}

/// Encode the marks of a student into a single field value
pub fn encode(student: &Student) -> String {
    encode_semesters(student.semesters())
}

/// Encode semester slots. Only active semesters with subjects are written.
pub fn encode_semesters(semesters: &[SemesterRecord]) -> String {
    let blocks: Vec<String> = semesters
        .iter()
        .filter(|semester| semester.has_subjects())
        .map(|semester| {
            let subjects: Vec<String> = semester
                .subjects()
                .iter()
                .map(|s| format!("{}{}{}", s.name, MARK_SEPARATOR, s.mark))
                .collect();
            format!(
                "{}{}{}{}",
                SEMESTER_PREFIX,
                semester.number(),
                HEADER_SEPARATOR,
                subjects.join(&SUBJECT_SEPARATOR.to_string())
            )
        })
        .collect();

    blocks.join(&SEMESTER_SEPARATOR.to_string())
}

/// Decode a marks field into `student`, replacing whatever marks it held.
///
/// Returns the sub-tokens that were skipped. Each is also logged as a warning.
///
/// Semester numbers and marks must be whole integers, so fractional or
/// exponent forms such as `90.0` or `1e2` are skipped like any other bad token.
pub fn decode(field: &str, student: &mut Student) -> Vec<MarksWarning> {
    student.clear_marks();
    let mut warnings = Vec::new();

    for block in field.split(SEMESTER_SEPARATOR) {
        if block.is_empty() {
            continue;
        }

        let Some((header, subject_list)) = split_pair(block, HEADER_SEPARATOR) else {
            warnings.push(MarksWarning::MalformedBlock(block.to_string()));
            continue;
        };

        let Some(number) = parse_semester_header(header) else {
            warnings.push(MarksWarning::InvalidSemesterHeader(header.to_string()));
            continue;
        };

        let Ok(semester) = student.semester_mut(number) else {
            warnings.push(MarksWarning::InvalidSemesterHeader(header.to_string()));
            continue;
        };
        semester.reset();
        semester.activate();

        if subject_list.is_empty() {
            continue;
        }
        decode_subjects(subject_list, semester, &mut warnings);
    }

    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}

fn decode_subjects(list: &str, semester: &mut SemesterRecord, warnings: &mut Vec<MarksWarning>) {
    let number = semester.number();

    for entry in list.split(SUBJECT_SEPARATOR) {
        if semester.is_full() {
            warnings.push(MarksWarning::TooManySubjects {
                semester: number,
                limit: MAX_SUBJECTS_PER_SEMESTER,
            });
            break;
        }
        if entry.is_empty() {
            continue;
        }

        let Some((name, raw_mark)) = split_pair(entry, MARK_SEPARATOR) else {
            warnings.push(MarksWarning::MalformedEntry {
                semester: number,
                entry: entry.to_string(),
            });
            continue;
        };

        if name.is_empty() || name.len() > MAX_SUBJECT_NAME_LENGTH {
            warnings.push(MarksWarning::InvalidSubjectName {
                semester: number,
                name: name.to_string(),
            });
            continue;
        }

        let mark = match raw_mark.trim().parse::<u8>() {
            Ok(mark) if mark <= MAX_MARK => mark,
            _ => {
                warnings.push(MarksWarning::InvalidMark {
                    semester: number,
                    subject: name.to_string(),
                    raw: raw_mark.to_string(),
                });
                continue;
            }
        };

        // Name and mark were checked above and the semester is not full.
        if let Err(e) = semester.add_subject(name, mark) {
            warn!("Dropping subject {} in semester {}: {}", name, number, e);
        }
    }
}

/// `S<n>` with `n` an integer; range is checked by the caller
fn parse_semester_header(header: &str) -> Option<u8> {
    let digits = header.strip_prefix(SEMESTER_PREFIX)?;
    if digits.is_empty() {
        return None;
    }
    digits.trim().parse::<u8>().ok()
}

/// Split on `delim`, requiring exactly two parts
fn split_pair(s: &str, delim: char) -> Option<(&str, &str)> {
    let (left, right) = s.split_once(delim)?;
    if right.contains(delim) {
        return None;
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Student {
        Student::new("1", "Alice", 20, "CS").unwrap()
    }

    #[test]
    fn test_encode_skips_inactive_and_empty_semesters() {
        let mut s = blank();
        assert_eq!(encode(&s), "");

        s.activate_semester(1).unwrap();
        assert_eq!(encode(&s), "");

        s.add_subject(2, "Math", 90).unwrap();
        s.add_subject(2, "Art", 7).unwrap();
        s.add_subject(4, "Bio", 100).unwrap();
        assert_eq!(encode(&s), "S2:Math=90,Art=7;S4:Bio=100");
    }

    #[test]
    fn test_decode_simple_field() {
        let mut s = blank();
        let warnings = decode("S1:Math=90,Physics=75;S3:", &mut s);
        assert!(warnings.is_empty());

        let sem1 = s.semester(1).unwrap();
        assert!(sem1.is_active());
        assert_eq!(sem1.subjects().len(), 2);
        assert_eq!(sem1.subjects()[1].name, "Physics");
        assert_eq!(sem1.subjects()[1].mark, 75);

        // Header with no subjects still activates the semester
        assert!(s.semester(3).unwrap().is_active());
        assert!(s.semester(3).unwrap().subjects().is_empty());
        assert!(!s.semester(2).unwrap().is_active());
    }

    #[test]
    fn test_decode_replaces_existing_marks() {
        let mut s = blank();
        s.add_subject(2, "Old", 10).unwrap();
        decode("S1:New=20", &mut s);
        assert!(!s.semester(2).unwrap().is_active());
        assert_eq!(s.semester(1).unwrap().subjects()[0].name, "New");

        decode("", &mut s);
        assert!(!s.has_active_semester());
    }

    #[test]
    fn test_decode_skips_bad_blocks() {
        let mut s = blank();
        let warnings = decode(";S5:A=1;X1:B=2;S2;S0:C=3;S:D=4;S1:E=5:6;S4:Ok=50;;", &mut s);

        assert_eq!(warnings.len(), 6);
        assert!(matches!(warnings[0], MarksWarning::InvalidSemesterHeader(_)));
        assert!(matches!(warnings[2], MarksWarning::MalformedBlock(_)));
        assert_eq!(s.semester(4).unwrap().subjects()[0].mark, 50);
        assert!(!s.semester(1).unwrap().is_active());
        assert!(!s.semester(2).unwrap().is_active());
    }

    #[test]
    fn test_decode_skips_bad_entries_only() {
        let mut s = blank();
        let long = "x".repeat(MAX_SUBJECT_NAME_LENGTH + 1);
        let field = format!("S1:Math=90,NoMark,=5,{}=4,Art=101,Bio=-1,Chem=abc,,Geo=60", long);
        let warnings = decode(&field, &mut s);

        let names: Vec<&str> = s
            .semester(1)
            .unwrap()
            .subjects()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Math", "Geo"]);
        assert_eq!(warnings.len(), 6);
        assert!(matches!(warnings[0], MarksWarning::MalformedEntry { semester: 1, .. }));
        assert!(matches!(warnings[1], MarksWarning::InvalidSubjectName { .. }));
        assert!(matches!(warnings[3], MarksWarning::InvalidMark { .. }));
    }

    #[test]
    fn test_decode_requires_whole_number_marks() {
        let mut s = blank();
        let warnings = decode("S1:Math=90.0,Art=1e2,Geo=70", &mut s);

        let subjects = s.semester(1).unwrap().subjects();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].name, "Geo");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| matches!(w, MarksWarning::InvalidMark { .. })));
    }

    #[test]
    fn test_decode_caps_subjects_per_semester() {
        let mut s = blank();
        let warnings = decode("S2:A=1,B=2,C=3,D=4,E=5,F=6,G=7", &mut s);

        assert_eq!(s.semester(2).unwrap().subjects().len(), MAX_SUBJECTS_PER_SEMESTER);
        assert_eq!(
            warnings,
            vec![MarksWarning::TooManySubjects {
                semester: 2,
                limit: MAX_SUBJECTS_PER_SEMESTER
            }]
        );
    }

    #[test]
    fn test_repeated_semester_block_overwrites() {
        let mut s = blank();
        decode("S1:A=1;S1:B=2", &mut s);
        let subjects = s.semester(1).unwrap().subjects();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].name, "B");
    }
}
