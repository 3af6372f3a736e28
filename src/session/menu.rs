//! Main menu and the record workflows behind each entry

use super::prompt::Prompter;
use super::report;
use super::{Result, SessionError};
use crate::codec::{has_reserved_delimiter, RESERVED_DELIMITERS};
use crate::query::search;
use crate::records::constants::{
    MAX_AGE, MAX_MARK, MAX_SUBJECTS_PER_SEMESTER, MAX_SUBJECT_NAME_LENGTH, MIN_AGE, MIN_MARK,
    SEMESTER_COUNT,
};
use crate::records::errors::RecordError;
use crate::records::store::{FieldUpdate, MarksEdit, RecordStore};
use crate::records::student::{is_digits, validate_id, Student};
use crate::storage;
use log::{error, warn};
use std::path::{Path, PathBuf};

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    AddStudent,
    ListStudents,
    Search,
    Update,
    Delete,
    Save,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(MenuChoice::Exit),
            1 => Some(MenuChoice::AddStudent),
            2 => Some(MenuChoice::ListStudents),
            3 => Some(MenuChoice::Search),
            4 => Some(MenuChoice::Update),
            5 => Some(MenuChoice::Delete),
            6 => Some(MenuChoice::Save),
            _ => None,
        }
    }

    /// Whether an autosave follows this entry
    fn autosaves(self) -> bool {
        !matches!(self, MenuChoice::Exit | MenuChoice::Save)
    }
}

const MAIN_MENU: [&str; 9] = [
    "--- Student Database Management System ---",
    "1. Add Student (and Marks)",
    "2. Display All Students (Summary)",
    "3. Search Students / View Details",
    "4. Update Student / Marks",
    "5. Delete Student",
    "6. Save Data to File",
    "0. Exit",
    "----------------------------------------",
];

const SEARCH_MENU: [&str; 5] = [
    "--- Search Students / View Details ---",
    "1. Search by ID Prefix (sorted descending, summary)",
    "2. Search by Exact ID (view full details with marks)",
    "3. Search by Mark in a Subject",
    "0. Back to Main Menu",
];

/// An interactive session over one store and one database file
pub struct Session<'a, P: Prompter> {
    store: &'a mut RecordStore,
    prompter: &'a mut P,
    path: PathBuf,
    autosave: bool,
    dirty: bool,
}

impl<'a, P: Prompter> Session<'a, P> {
    /// Create a session that saves to `path` after every menu action
    pub fn new(store: &'a mut RecordStore, prompter: &'a mut P, path: impl AsRef<Path>) -> Self {
        Session {
            store,
            prompter,
            path: path.as_ref().to_path_buf(),
            autosave: true,
            dirty: false,
        }
    }

    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// True if the store changed since the last successful save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Show the main menu until the user exits or input runs out
    pub fn run(&mut self) -> Result<()> {
        match self.menu_loop() {
            Err(SessionError::InputClosed) => {
                warn!("Input closed, leaving the menu");
                Ok(())
            }
            other => other,
        }
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            self.prompter.refresh(self.store);
            self.say("");
            self.say_all(MAIN_MENU.iter().map(|line| line.to_string()));

            let number = self.prompter.int_in_range("Enter your choice: ", 0, 6)?;
            let Some(choice) = MenuChoice::from_number(number) else {
                self.say("Invalid choice. Please try again.");
                continue;
            };

            if choice == MenuChoice::Exit {
                self.finish()?;
                self.say("Exiting program.");
                return Ok(());
            }
            self.run_choice(choice)?;

            if self.autosave && choice.autosaves() {
                self.say("Auto-saving data...");
                if let Err(e) = storage::save_store(&self.path, self.store) {
                    error!("{}", e);
                    self.say("Error: Auto-save failed!");
                } else {
                    self.dirty = false;
                }
            }
        }
    }

    /// Run the workflow behind one menu entry
    pub fn run_choice(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddStudent => self.add_student(),
            MenuChoice::ListStudents => {
                self.display_all();
                Ok(())
            }
            MenuChoice::Search => self.search_menu(),
            MenuChoice::Update => self.update_student(),
            MenuChoice::Delete => self.delete_student(),
            MenuChoice::Save => {
                self.save();
                Ok(())
            }
            MenuChoice::Exit => self.finish(),
        }
    }

    fn say(&mut self, line: &str) {
        self.prompter.say(line);
    }

    fn say_all(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.prompter.say(&line);
        }
    }

    fn changed(&mut self) {
        self.dirty = true;
        self.prompter.refresh(self.store);
    }

    /// Offer to save unsaved changes when autosave is off
    fn finish(&mut self) -> Result<()> {
        if !self.autosave
            && self.dirty
            && self
                .prompter
                .confirm("Save changes before exiting? (y/n): ")?
        {
            self.save();
        }
        Ok(())
    }

    fn save(&mut self) {
        match storage::save_store(&self.path, self.store) {
            Ok(()) => {
                self.dirty = false;
                let message = format!("Data saved to {} successfully.", self.path.display());
                self.say(&message);
            }
            Err(e) => {
                error!("{}", e);
                let message = format!("Error saving data to {}.", self.path.display());
                self.say(&message);
            }
        }
    }

    fn warn_reserved(&mut self, value: &str) {
        if has_reserved_delimiter(value) {
            let listed: Vec<String> = RESERVED_DELIMITERS.iter().map(char::to_string).collect();
            let message = format!(
                "Warning: '{}' contains one of {} and will not be saved intact.",
                value,
                listed.join(" ")
            );
            self.say(&message);
        }
    }

    fn subject_name(&mut self, prompt: &str) -> Result<String> {
        loop {
            let name = self.prompter.non_empty(prompt)?;
            if name.len() <= MAX_SUBJECT_NAME_LENGTH {
                self.warn_reserved(&name);
                return Ok(name);
            }
            let message = format!(
                "Subject name too long (max {} chars).",
                MAX_SUBJECT_NAME_LENGTH
            );
            self.say(&message);
        }
    }

    fn mark(&mut self, prompt: &str) -> Result<u8> {
        let mark = self
            .prompter
            .int_in_range(prompt, MIN_MARK.into(), MAX_MARK.into())?;
        Ok(mark as u8)
    }

    fn text_field(&mut self, prompt: &str) -> Result<String> {
        let value = self.prompter.non_empty(prompt)?;
        self.warn_reserved(&value);
        Ok(value)
    }

    fn age(&mut self, prompt: &str) -> Result<u32> {
        let age = self
            .prompter
            .int_in_range(prompt, MIN_AGE.into(), MAX_AGE.into())?;
        Ok(age as u32)
    }

    fn report_error(&mut self, e: RecordError) {
        let message = format!("Error: {}.", e);
        self.say(&message);
    }

    fn add_student(&mut self) -> Result<()> {
        if self.store.is_full() {
            self.say("Database is full. Cannot add more students.");
            return Ok(());
        }
        self.say("");
        self.say("--- Add New Student ---");

        let id = loop {
            let id = self.prompter.non_empty("Enter Student ID (digits only): ")?;
            if let Err(e) = validate_id(&id) {
                self.report_error(e);
            } else if self.store.contains_id(&id) {
                self.report_error(RecordError::DuplicateId(id));
            } else {
                break id;
            }
        };
        let name = self.text_field("Enter Student Name: ")?;
        let age = self.age("Enter Student Age: ")?;
        let major = self.text_field("Enter Student Major: ")?;

        let mut student = match Student::new(id, name, age, major) {
            Ok(student) => student,
            Err(e) => {
                self.report_error(e);
                return Ok(());
            }
        };

        let heading = format!("--- Add Marks for Student {} ---", student.name());
        self.say("");
        self.say(&heading);
        self.add_marks(&mut student)?;

        let added = format!(
            "Student {} (ID: {}) added successfully!",
            student.name(),
            student.id()
        );
        match self.store.create(student) {
            Ok(_) => {
                self.changed();
                self.say(&added);
            }
            Err(e) => self.report_error(e),
        }
        Ok(())
    }

    /// Ask for marks semester by semester on a student not yet in the store
    fn add_marks(&mut self, student: &mut Student) -> Result<()> {
        for number in 1..=SEMESTER_COUNT as u8 {
            let question = format!("Add marks for Semester {}? (y/n): ", number);
            if !self.prompter.confirm(&question)? {
                continue;
            }
            if let Err(e) = student.activate_semester(number) {
                self.report_error(e);
                continue;
            }
            self.say(&format!("--- Semester {} ---", number));

            for _ in 0..MAX_SUBJECTS_PER_SEMESTER {
                let taken = student
                    .semester(number)
                    .map(|s| s.subjects().len())
                    .unwrap_or_default();
                let question = format!(
                    "Add subject {} for Semester {}? (y/n, or 'q' to finish semester): ",
                    taken + 1,
                    number
                );
                match self.prompter.single_char(&question)? {
                    'q' | 'Q' => break,
                    'y' | 'Y' => {}
                    _ => continue,
                }

                let name = self.subject_name("Enter Subject Name: ")?;
                let mark = self.mark("Enter Mark (0-100): ")?;
                if let Err(e) = student.add_subject(number, &name, mark) {
                    self.report_error(e);
                }
            }
        }
        Ok(())
    }

    fn display_all(&mut self) {
        let heading = format!("--- All Students (Summary) --- ({} total)", self.store.len());
        self.say("");
        self.say(&heading);
        if self.store.is_empty() {
            self.say("No students in the database.");
            return;
        }
        let lines = report::table(self.store.iter(), true);
        self.say_all(lines);
        self.say("To view detailed marks, use the Search option.");
    }

    fn search_menu(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.say("No students in the database to search.");
            return Ok(());
        }
        self.say("");
        self.say_all(SEARCH_MENU.iter().map(|line| line.to_string()));

        match self.prompter.int_in_range("Enter search type: ", 0, 3)? {
            1 => self.search_by_prefix(),
            2 => self.search_by_exact_id(),
            3 => self.search_by_subject_mark(),
            _ => Ok(()),
        }
    }

    fn search_by_prefix(&mut self) -> Result<()> {
        let prefix = self.prompter.non_empty("Enter ID prefix to search: ")?;
        let lines = match search::by_id_prefix(self.store, &prefix) {
            Err(_) => vec!["Invalid ID prefix format or empty.".to_string()],
            Ok(found) if found.is_empty() => vec![format!(
                "No students found with ID starting with '{}'.",
                prefix
            )],
            Ok(found) => {
                let mut lines = vec![
                    String::new(),
                    format!(
                        "Students with ID starting with '{}' ({} found, sorted descending by ID):",
                        prefix,
                        found.len()
                    ),
                ];
                lines.extend(report::table(found, true));
                lines
            }
        };
        self.say_all(lines);
        Ok(())
    }

    fn search_by_exact_id(&mut self) -> Result<()> {
        let id = self.prompter.non_empty("Enter exact Student ID to search: ")?;
        let lines = match search::by_exact_id(self.store, &id) {
            Ok(student) => {
                let mut lines = vec![String::new()];
                lines.extend(report::student_details(student, true));
                lines
            }
            Err(RecordError::NotFound(_)) => {
                vec![format!("Student with ID '{}' not found.", id)]
            }
            Err(_) => vec!["Invalid ID format: Must contain only digits.".to_string()],
        };
        self.say_all(lines);
        Ok(())
    }

    fn search_by_subject_mark(&mut self) -> Result<()> {
        let semester = self
            .prompter
            .int_in_range("Enter Semester Number (1-4): ", 1, SEMESTER_COUNT as i64)?
            as u8;
        let subject = self.prompter.non_empty("Enter Subject Name to search: ")?;
        let min_mark = self.mark("Enter minimum mark for this subject (0-100): ")?;

        let mut lines = vec![
            String::new(),
            format!(
                "Students with >= {} in '{}' (Semester {}):",
                min_mark, subject, semester
            ),
        ];
        lines.extend(report::table_header(false));
        let found = search::by_subject_mark(self.store, semester, &subject, min_mark);
        if found.is_empty() {
            lines.push(report::message_row(
                "No students found matching this criteria.",
                false,
            ));
        }
        lines.extend(found.into_iter().map(|s| report::table_row(s, false)));
        lines.push(report::table_rule(false));

        self.say_all(lines);
        Ok(())
    }

    fn update_student(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.say("No students in the database to update.");
            return Ok(());
        }
        self.say("");
        self.say("--- Update Student Information ---");

        let id = self.prompter.non_empty("Enter ID of student to update: ")?;
        if !is_digits(&id) {
            self.say("Invalid ID format. Update cancelled.");
            return Ok(());
        }
        let Some(student) = self.store.get(&id) else {
            self.say(&format!("Student with ID '{}' not found.", id));
            return Ok(());
        };

        let lines = vec![
            format!("Student found: {} (ID: {})", student.name(), student.id()),
            "What do you want to update?".to_string(),
            format!("1. Name (current: {})", student.name()),
            format!("2. Age (current: {})", student.age()),
            format!("3. Major (current: {})", student.major()),
            "4. Marks".to_string(),
            "0. Cancel".to_string(),
        ];
        self.say_all(lines);

        let update = match self.prompter.int_in_range("Enter field to update: ", 0, 4)? {
            1 => FieldUpdate::Name(self.text_field("Enter new Name: ")?),
            2 => FieldUpdate::Age(self.age("Enter new Age: ")?),
            3 => FieldUpdate::Major(self.text_field("Enter new Major: ")?),
            4 => return self.update_marks(&id),
            _ => {
                self.say("Update cancelled.");
                return Ok(());
            }
        };

        match self.store.update_field(&id, update) {
            Ok(()) => {
                self.changed();
                self.say("Student information updated successfully!");
            }
            Err(e) => self.report_error(e),
        }
        Ok(())
    }

    fn update_marks(&mut self, id: &str) -> Result<()> {
        let lines = match self.store.find(id) {
            Ok(student) => {
                let mut lines = vec![
                    String::new(),
                    format!(
                        "--- Update Marks for {} (ID: {}) ---",
                        student.name(),
                        student.id()
                    ),
                ];
                lines.extend(report::marks_lines(student));
                lines
            }
            Err(e) => {
                self.report_error(e);
                return Ok(());
            }
        };
        self.say_all(lines);

        let semester = self.prompter.int_in_range(
            "Enter Semester number to update (1-4, or 0 to cancel): ",
            0,
            SEMESTER_COUNT as i64,
        )? as u8;
        if semester == 0 {
            self.say("Mark update cancelled.");
            return Ok(());
        }

        if !self.semester_active(id, semester) {
            let question = format!(
                "Semester {} was not previously active. Do you want to add marks now? (y/n): ",
                semester
            );
            if !self.prompter.confirm(&question)? {
                self.say(&format!("Mark update for Semester {} cancelled.", semester));
                return Ok(());
            }
            self.apply_marks_edit(id, MarksEdit::ActivateSemester(semester));
        }

        let (subjects, full) = match self.store.find(id).and_then(|s| s.semester(semester)) {
            Ok(record) => (report::numbered_subjects(record), record.is_full()),
            Err(e) => {
                self.report_error(e);
                return Ok(());
            }
        };

        self.say(&format!("--- Updating Semester {} ---", semester));
        if subjects.is_empty() {
            self.say(&format!(
                "No subjects currently recorded for Semester {}.",
                semester
            ));
        } else {
            self.say(&format!("Current subjects in Semester {}:", semester));
            self.say_all(subjects.iter().cloned());
        }
        self.say_all(
            [
                "Options:",
                "1. Add a new subject and mark",
                "2. Update mark for an existing subject",
                "0. Finish updating this semester",
            ]
            .iter()
            .map(|line| line.to_string()),
        );

        match self.prompter.int_in_range("Choose action: ", 0, 2)? {
            1 if full => {
                self.say(&format!(
                    "Cannot add more subjects to Semester {} (limit: {}).",
                    semester, MAX_SUBJECTS_PER_SEMESTER
                ));
            }
            1 => {
                let name = self.subject_name("Enter New Subject Name: ")?;
                let mark = self.mark("Enter Mark (0-100): ")?;
                let edit = MarksEdit::AddSubject {
                    semester,
                    name: name.clone(),
                    mark,
                };
                if self.apply_marks_edit(id, edit) {
                    self.say(&format!(
                        "Subject '{}' added to Semester {}.",
                        name, semester
                    ));
                }
            }
            2 if subjects.is_empty() => {
                self.say(&format!("No subjects to update in Semester {}.", semester));
            }
            2 => {
                let subject = self
                    .prompter
                    .non_empty("Enter name of subject to update mark for: ")?;
                if self.has_subject(id, semester, &subject) {
                    let mark = self.mark("Enter new Mark (0-100): ")?;
                    let edit = MarksEdit::UpdateMark {
                        semester,
                        subject: subject.clone(),
                        mark,
                    };
                    if self.apply_marks_edit(id, edit) {
                        self.say(&format!(
                            "Mark for '{}' in Semester {} updated to {}.",
                            subject, semester, mark
                        ));
                    }
                } else {
                    self.say(&format!(
                        "Subject '{}' not found in Semester {}.",
                        subject, semester
                    ));
                }
            }
            _ => {}
        }

        self.say(&format!(
            "Finished updating marks for Semester {}.",
            semester
        ));
        Ok(())
    }

    fn semester_active(&self, id: &str, semester: u8) -> bool {
        self.store
            .find(id)
            .and_then(|s| s.semester(semester))
            .is_ok_and(|s| s.is_active())
    }

    fn has_subject(&self, id: &str, semester: u8, subject: &str) -> bool {
        self.store
            .find(id)
            .and_then(|s| s.semester(semester))
            .is_ok_and(|s| s.subject(subject).is_some())
    }

    /// Apply an edit, reporting failure to the user. Returns true on success.
    fn apply_marks_edit(&mut self, id: &str, edit: MarksEdit) -> bool {
        match self.store.edit_marks(id, edit) {
            Ok(()) => {
                self.changed();
                true
            }
            Err(e) => {
                self.report_error(e);
                false
            }
        }
    }

    fn delete_student(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.say("No students in the database to delete.");
            return Ok(());
        }
        self.say("");
        self.say("--- Delete Student ---");

        let id = self.prompter.non_empty("Enter ID of student to delete: ")?;
        if !is_digits(&id) {
            self.say("Invalid ID format. Deletion cancelled.");
            return Ok(());
        }
        let question = match self.store.get(&id) {
            Some(student) => format!(
                "Are you sure you want to delete student: {} (ID: {})? (y/n): ",
                student.name(),
                student.id()
            ),
            None => {
                self.say(&format!("Student with ID '{}' not found.", id));
                return Ok(());
            }
        };

        if !self.prompter.confirm(&question)? {
            self.say("Deletion cancelled.");
            return Ok(());
        }
        match self.store.delete(&id) {
            Ok(_) => {
                self.changed();
                self.say("Student deleted successfully.");
            }
            Err(e) => self.report_error(e),
        }
        Ok(())
    }
}
