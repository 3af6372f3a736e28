//! Text rendering of student tables, details and marks

use crate::records::constants::{MAX_ID_LENGTH, MAX_SUBJECT_NAME_LENGTH};
use crate::records::student::{SemesterRecord, Student};

const MARKS_COLUMN_WIDTH: usize = 11;

fn column_titles(with_marks: bool) -> String {
    let mut titles = format!(
        "| {:<id_width$} | {:<25} | {:<3} | {:<20} |",
        "ID",
        "Name",
        "Age",
        "Major",
        id_width = MAX_ID_LENGTH
    );
    if with_marks {
        titles.push_str(&format!(" {:<width$} |", "Marks Added", width = MARKS_COLUMN_WIDTH));
    }
    titles
}

/// Horizontal rule as wide as the table
pub fn table_rule(with_marks: bool) -> String {
    "-".repeat(column_titles(with_marks).len())
}

/// Rule, column titles, rule
pub fn table_header(with_marks: bool) -> Vec<String> {
    let rule = table_rule(with_marks);
    vec![rule.clone(), column_titles(with_marks), rule]
}

/// One table row for a student
pub fn table_row(student: &Student, with_marks: bool) -> String {
    let mut row = format!(
        "| {:<id_width$} | {:<25} | {:<3} | {:<20} |",
        student.id(),
        student.name(),
        student.age(),
        student.major(),
        id_width = MAX_ID_LENGTH
    );
    if with_marks {
        let added = if student.has_marks() { "Yes" } else { "No" };
        row.push_str(&format!(" {:<width$} |", added, width = MARKS_COLUMN_WIDTH));
    }
    row
}

/// A full-width row holding a message instead of a student
pub fn message_row(message: &str, with_marks: bool) -> String {
    let inner = table_rule(with_marks).len() - 4;
    format!("| {:<inner$} |", message)
}

/// Header, one row per student, closing rule
pub fn table<'a>(students: impl IntoIterator<Item = &'a Student>, with_marks: bool) -> Vec<String> {
    let mut lines = table_header(with_marks);
    lines.extend(students.into_iter().map(|s| table_row(s, with_marks)));
    lines.push(table_rule(with_marks));
    lines
}

/// Full details of one student, optionally with marks
pub fn student_details(student: &Student, show_marks: bool) -> Vec<String> {
    let mut lines = vec![
        "--- Student Details ---".to_string(),
        format!("ID    : {}", student.id()),
        format!("Name  : {}", student.name()),
        format!("Age   : {}", student.age()),
        format!("Major : {}", student.major()),
    ];
    if show_marks {
        lines.extend(marks_lines(student));
    }
    lines.push("-----------------------".to_string());
    lines
}

/// Marks of every active semester
pub fn marks_lines(student: &Student) -> Vec<String> {
    let mut lines = vec!["--- Marks ---".to_string()];

    for semester in student.semesters().iter().filter(|s| s.is_active()) {
        if semester.has_subjects() {
            lines.push(format!("Semester {}:", semester.number()));
            for subject in semester.subjects() {
                lines.push(format!(
                    "  {:<width$}: {:>3}",
                    subject.name,
                    subject.mark,
                    width = MAX_SUBJECT_NAME_LENGTH
                ));
            }
        } else {
            lines.push(format!(
                "Semester {}: No subjects recorded.",
                semester.number()
            ));
        }
    }

    if !student.has_active_semester() {
        lines.push(
            "No marks data (or no active semesters with marks) recorded for this student."
                .to_string(),
        );
    }
    lines
}

/// Numbered subject list used while editing a semester
pub fn numbered_subjects(semester: &SemesterRecord) -> Vec<String> {
    semester
        .subjects()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {} (Mark: {})", i + 1, s.name, s.mark))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_line_up_with_header() {
        let mut s = Student::new("123", "Alice", 20, "CS").unwrap();
        let header = table_header(true);
        assert_eq!(header[0].len(), header[1].len());
        assert_eq!(header[1].len(), table_row(&s, true).len());
        assert!(table_row(&s, true).ends_with(" No          |"));

        s.add_subject(1, "Math", 90).unwrap();
        assert!(table_row(&s, true).ends_with(" Yes         |"));
        assert_eq!(table_header(false)[1].len(), table_row(&s, false).len());
        assert_eq!(message_row("none", false).len(), table_rule(false).len());
    }

    #[test]
    fn test_marks_lines() {
        let mut s = Student::new("1", "Bo", 30, "Art").unwrap();
        assert_eq!(
            marks_lines(&s)[1],
            "No marks data (or no active semesters with marks) recorded for this student."
        );

        s.add_subject(2, "Clay", 7).unwrap();
        s.activate_semester(3).unwrap();
        let lines = marks_lines(&s);
        assert_eq!(lines[1], "Semester 2:");
        assert_eq!(lines[2], format!("  {:<30}:   7", "Clay"));
        assert_eq!(lines[3], "Semester 3: No subjects recorded.");
        assert_eq!(lines.len(), 4);
    }
}
