//! Whole-store load and save

use super::errors::{Result, StorageError};
use crate::codec::{self, has_reserved_delimiter, MarksWarning};
use crate::records::constants::CSV_HEADER;
use crate::records::errors::RecordError;
use crate::records::store::RecordStore;
use crate::records::student::{validate_id, Student};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 5;

/// Why a data line was not loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineRejection {
    #[error("expected 5 fields, got {0}")]
    FieldCount(usize),

    #[error("{0}")]
    InvalidId(RecordError),

    #[error("duplicate student id '{0}'")]
    DuplicateId(String),

    #[error("invalid age '{0}'")]
    InvalidAge(String),
}

/// A data line that was skipped during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file, header included
    pub line_number: usize,
    pub line: String,
    pub reason: LineRejection,
}

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// False when the file did not exist and the store started empty
    pub file_found: bool,
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    /// Marks sub-tokens dropped across all loaded records
    pub marks_warnings: usize,
    /// Loading stopped because the store reached capacity
    pub truncated: bool,
}

/// Load the file at `path` into a new store with the default capacity.
///
/// A missing file gives an empty store and a report with `file_found == false`.
pub fn load_store(path: impl AsRef<Path>) -> Result<(RecordStore, LoadReport)> {
    let mut store = RecordStore::new();
    let report = load_into(path, &mut store)?;
    Ok((store, report))
}

/// Replace the contents of `store` with the records in the file at `path`
pub fn load_into(path: impl AsRef<Path>, store: &mut RecordStore) -> Result<LoadReport> {
    let path = path.as_ref();
    store.clear();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No database file at {}, starting empty", path.display());
            return Ok(LoadReport::default());
        }
        Err(source) => {
            return Err(StorageError::Open {
                path: path.to_path_buf(),
                action: "reading",
                source,
            })
        }
    };

    let report = read_from(BufReader::new(file), store).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Loaded {} student(s) from {} ({} line(s) skipped)",
        report.loaded,
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Read a database file from `reader`, appending records to `store`.
///
/// The first line is the header and is discarded. Malformed lines are logged,
/// recorded in the report and skipped. Reading stops once the store is full.
pub fn read_from<R: BufRead>(reader: R, store: &mut RecordStore) -> io::Result<LoadReport> {
    let mut report = LoadReport {
        file_found: true,
        ..LoadReport::default()
    };

    let mut lines = reader.split(b'\n');
    if lines.next().transpose()?.is_none() {
        return Ok(report);
    }

    for (index, raw) in lines.enumerate() {
        let raw = raw?;
        let line_number = index + 2;
        let line = String::from_utf8(raw).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {} is not valid UTF-8: {}", line_number, e),
            )
        })?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        if store.is_full() {
            debug!("Store full at line {}, remaining lines not loaded", line_number);
            report.truncated = true;
            break;
        }

        match parse_line(line, store) {
            Ok((student, warnings)) => {
                if !warnings.is_empty() {
                    warn!(
                        "Marks for student {} may be incomplete ({} entries skipped)",
                        student.id(),
                        warnings.len()
                    );
                    report.marks_warnings += warnings.len();
                }
                match store.create(student) {
                    Ok(_) => report.loaded += 1,
                    Err(e) => {
                        // parse_line checks id and duplicates, so only capacity can land here
                        debug!("Line {} not loaded: {}", line_number, e);
                        report.truncated = true;
                        break;
                    }
                }
            }
            Err(reason) => {
                warn!(
                    "Skipping line {} ({}): {}",
                    line_number, reason, line
                );
                report.skipped.push(SkippedLine {
                    line_number,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

fn parse_line(
    line: &str,
    store: &RecordStore,
) -> std::result::Result<(Student, Vec<MarksWarning>), LineRejection> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [id, name, age, major, marks] = fields[..] else {
        return Err(LineRejection::FieldCount(fields.len()));
    };

    validate_id(id).map_err(LineRejection::InvalidId)?;
    if store.contains_id(id) {
        return Err(LineRejection::DuplicateId(id.to_string()));
    }
    let age = parse_age(age).ok_or_else(|| LineRejection::InvalidAge(age.to_string()))?;

    let mut student = Student::from_stored(id.to_string(), name.to_string(), age, major.to_string())
        .map_err(LineRejection::InvalidId)?;
    let warnings = codec::decode(marks, &mut student);
    Ok((student, warnings))
}

/// A positive whole number, surrounding whitespace allowed.
/// Forms like `20.0` or `2e1` are rejected.
fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

/// Write the whole store to `writer`: header, then one line per record
pub fn write_to<W: Write>(store: &RecordStore, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for student in store {
        warn_if_unsafe(student);
        writeln!(
            writer,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            student.id(),
            student.name(),
            student.age(),
            student.major(),
            codec::encode(student),
            sep = FIELD_SEPARATOR
        )?;
    }
    writer.flush()
}

/// Truncate and rewrite the file at `path` with the contents of `store`
pub fn save_store(path: impl AsRef<Path>, store: &RecordStore) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        action: "writing",
        source,
    })?;
    let write_error = |source: io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    write_to(store, &mut writer).map_err(write_error)?;
    let file = writer.into_inner().map_err(|e| write_error(e.into_error()))?;
    file.sync_all().map_err(write_error)?;

    info!("Saved {} student(s) to {}", store.len(), path.display());
    Ok(())
}

/// Field values containing delimiters are written unchanged but will not
/// read back the same way.
fn warn_if_unsafe(student: &Student) {
    let unsafe_field = [student.name(), student.major()]
        .into_iter()
        .chain(
            student
                .semesters()
                .iter()
                .flat_map(|s| s.subjects().iter().map(|m| m.name.as_str())),
        )
        .find(|value| has_reserved_delimiter(value));

    if let Some(value) = unsafe_field {
        warn!(
            "Student {} has a value containing a reserved delimiter ({:?}); it will not load back intact",
            student.id(),
            value
        );
    }
}
