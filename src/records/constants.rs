// Limits and fixed names for the student records store

/// Maximum number of students the store will hold
pub const MAX_STUDENTS: usize = 100;

/// Maximum length of a student id (digits only)
pub const MAX_ID_LENGTH: usize = 25;

/// Maximum length of a subject name
pub const MAX_SUBJECT_NAME_LENGTH: usize = 30;

/// Number of semester slots carried by every student
pub const SEMESTER_COUNT: usize = 4;

/// Maximum number of subjects recorded per semester
pub const MAX_SUBJECTS_PER_SEMESTER: usize = 5;

/// Accepted age range when creating or editing a student
pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 100;

/// Accepted mark range
pub const MIN_MARK: u8 = 0;
pub const MAX_MARK: u8 = 100;

/// Database file used when none is given on the command line
pub const DEFAULT_DATABASE_FILE: &str = "students.csv";

/// First line of every database file
pub const CSV_HEADER: &str = "ID,Name,Age,Major,MarksData";
