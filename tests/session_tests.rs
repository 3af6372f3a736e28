// Integration tests driving the menu session with scripted console input

use rollcall::records::{RecordStore, Student};
use rollcall::session::{ConsolePrompter, Session};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Run a session over `script` (one answer per line) and return what it
/// printed and whether it ended with unsaved changes.
fn run_script(store: &mut RecordStore, path: &Path, autosave: bool, script: &[&str]) -> (String, bool) {
    let mut input = script.join("\n");
    input.push('\n');
    let mut prompter = ConsolePrompter::new(Cursor::new(input.into_bytes()), Vec::new());

    let dirty = {
        let mut session = Session::new(store, &mut prompter, path).with_autosave(autosave);
        session.run().expect("session failed");
        session.is_dirty()
    };
    let output = String::from_utf8(prompter.into_output()).expect("utf-8 output");
    (output, dirty)
}

fn store_with(ids: &[&str]) -> RecordStore {
    let mut store = RecordStore::new();
    for id in ids {
        store
            .create(Student::new(*id, format!("Name{}", id), 20, "CS").unwrap())
            .unwrap();
    }
    store
}

#[test]
fn test_add_student_with_marks_autosaves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("students.csv");
    let mut store = RecordStore::new();

    let script = [
        "1", "123", "Alice", "20", "CS", // menu, id, name, age, major
        "y", "y", "Math", "90", "q", // semester 1: one subject then finish
        "n", "n", "n", // semesters 2-4
        "0",
    ];
    let (output, dirty) = run_script(&mut store, &path, true, &script);

    assert!(output.contains("Student Alice (ID: 123) added successfully!"));
    assert!(output.contains("Auto-saving data..."));
    assert!(output.contains("Exiting program."));
    assert!(!dirty);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "ID,Name,Age,Major,MarksData\n123,Alice,20,CS,S1:Math=90\n"
    );
}

#[test]
fn test_add_rejects_bad_and_duplicate_ids() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("students.csv");
    let mut store = store_with(&["7"]);

    let script = [
        "1", "12a", "7", "8", "Bo", "150", "30", "Art", "n", "n", "n", "n", "0", "n",
    ];
    let (output, _) = run_script(&mut store, &path, false, &script);

    assert!(output.contains("Error: invalid student id '12a'"));
    assert!(output.contains("Error: student id '7' already exists."));
    assert!(output.contains("Input out of range. Please enter an integer between 5 and 100."));
    assert_eq!(store.len(), 2);
    assert_eq!(store.find("8").unwrap().age(), 30);
}

#[test]
fn test_prefix_search_sorts_descending() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = store_with(&["5", "15", "50", "9"]);

    let (output, _) = run_script(&mut store, &dir.path().join("s.csv"), false, &["3", "1", "5", "0"]);

    assert!(output.contains("Students with ID starting with '5' (2 found, sorted descending by ID):"));
    let fifty = output.find("| 50 ").expect("row for 50");
    let five = output.find("| 5  ").expect("row for 5");
    assert!(fifty < five);
    assert!(!output.contains("| 15 "));
}

#[test]
fn test_exact_search_shows_details_and_marks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = RecordStore::new();
    let mut s = Student::new("42", "Zed", 33, "Music").unwrap();
    s.add_subject(2, "Piano", 88).unwrap();
    store.create(s).unwrap();

    let (output, _) = run_script(
        &mut store,
        &dir.path().join("s.csv"),
        false,
        &["3", "2", "42", "3", "2", "x1", "0"],
    );

    assert!(output.contains("Name  : Zed"));
    assert!(output.contains("Semester 2:"));
    assert!(output.contains("Invalid ID format: Must contain only digits."));
}

#[test]
fn test_subject_mark_search() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = RecordStore::new();
    for (id, mark) in [("1", 55), ("2", 80), ("3", 95)] {
        let mut s = Student::new(id, format!("S{}", id), 20, "CS").unwrap();
        s.add_subject(1, "Math", mark).unwrap();
        store.create(s).unwrap();
    }

    let (output, _) = run_script(
        &mut store,
        &dir.path().join("s.csv"),
        false,
        &["3", "3", "1", "Math", "80", "3", "3", "2", "Math", "0", "0"],
    );

    assert!(output.contains("Students with >= 80 in 'Math' (Semester 1):"));
    assert!(output.contains("| 2 "));
    assert!(output.contains("| 3 "));
    assert!(!output.contains("| 1  "));
    assert!(output.contains("No students found matching this criteria."));
}

#[test]
fn test_delete_then_decline_save_on_exit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("students.csv");
    let mut store = store_with(&["10", "20", "30"]);

    let (output, dirty) = run_script(&mut store, &path, false, &["5", "20", "y", "0", "n"]);

    assert!(output.contains("Student deleted successfully."));
    assert!(output.contains("Save changes before exiting? (y/n): "));
    assert!(dirty);
    assert!(!path.exists());
    let ids: Vec<&str> = store.iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["10", "30"]);
}

#[test]
fn test_failed_saves_keep_changes_pending() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("s.csv");
    let mut store = store_with(&["10", "20"]);

    let (output, dirty) = run_script(&mut store, &path, true, &["5", "10", "y", "6", "0"]);

    assert!(output.contains("Student deleted successfully."));
    assert!(output.contains("Error: Auto-save failed!"));
    assert!(output.contains("Error saving data to"));
    assert!(dirty);
    assert!(!path.exists());
    let ids: Vec<&str> = store.iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["20"]);
}

#[test]
fn test_delete_cancelled() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = store_with(&["10"]);

    let (output, dirty) = run_script(&mut store, &dir.path().join("s.csv"), false, &["5", "10", "n", "0"]);

    assert!(output.contains("Deletion cancelled."));
    assert!(!dirty);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_update_field_and_marks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("students.csv");
    let mut store = store_with(&["10"]);

    let script = [
        "4", "10", "3", "Physics", // new major
        "4", "10", "4", "2", "y", "1", "Art", "77", // activate semester 2 and add a subject
        "4", "10", "4", "2", "2", "Art", "79", // update that mark
        "6", "0",
    ];
    let (output, dirty) = run_script(&mut store, &path, false, &script);

    assert!(output.contains("Student information updated successfully!"));
    assert!(output.contains("Subject 'Art' added to Semester 2."));
    assert!(output.contains("Mark for 'Art' in Semester 2 updated to 79."));
    assert!(output.contains(&format!("Data saved to {} successfully.", path.display())));
    assert!(!dirty);

    let s = store.find("10").unwrap();
    assert_eq!(s.major(), "Physics");
    assert_eq!(s.semester(2).unwrap().subjects()[0].mark, 79);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "ID,Name,Age,Major,MarksData\n10,Name10,20,Physics,S2:Art=79\n"
    );
}

#[test]
fn test_menu_retries_bad_choices() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = RecordStore::new();

    let (output, _) = run_script(&mut store, &dir.path().join("s.csv"), true, &["abc", "9", "2", "0"]);

    assert!(output.contains("Invalid input. Please enter an integer."));
    assert!(output.contains("Input out of range. Please enter an integer between 0 and 6."));
    assert!(output.contains("Retry: "));
    assert!(output.contains("No students in the database."));
}

#[test]
fn test_input_closed_mid_flow_leaves_store_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = RecordStore::new();

    let (output, dirty) = run_script(&mut store, &dir.path().join("s.csv"), true, &["1", "123", "Alice"]);

    assert!(output.contains("Enter Student Age: "));
    assert!(store.is_empty());
    assert!(!dirty);
}
