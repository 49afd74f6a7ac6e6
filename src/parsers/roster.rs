//! Roster CSV readers for the two source systems.
//!
//! The Portal exports a single roster file with a nickname column; the
//! Event tool drops dated exports into a directory and the newest file is
//! used (file names sort lexicographically, which orders dated exports
//! chronologically).

use super::{
    find_column, parse_grade, record_line, FIRST_NAME_COLUMN, GRADE_COLUMN, LAST_NAME_COLUMN,
    NICKNAME_COLUMN, SCHOOL_COLUMN,
};
use crate::error::{Error, Result};
use crate::model::{EventStudent, PortalStudent, Student};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read the Portal roster export.
pub fn read_portal_roster(path: &Path) -> Result<Vec<PortalStudent>> {
    let reader = open_csv(path)?;
    let students = read_students(reader, path, true)?;
    Ok(students.into_iter().map(PortalStudent).collect())
}

/// Read one Event roster export. The Event system has no nickname field.
pub fn read_event_roster(path: &Path) -> Result<Vec<EventStudent>> {
    let reader = open_csv(path)?;
    let students = read_students(reader, path, false)?;
    Ok(students.into_iter().map(EventStudent).collect())
}

/// Read the newest Event roster export in `dir`.
pub fn read_latest_event_roster(dir: &Path) -> Result<Vec<EventStudent>> {
    let path = latest_roster_file(dir)?;
    read_event_roster(&path)
}

/// Pick the newest roster file in a directory of dated exports
/// (lexicographically greatest file name).
pub fn latest_roster_file(dir: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files
        .pop()
        .ok_or_else(|| Error::config(format!("no roster files found in {}", dir.display())))
}

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?)
}

fn read_students<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
    has_nickname: bool,
) -> Result<Vec<Student>> {
    let headers = reader.headers()?.clone();
    let school = find_column(&headers, SCHOOL_COLUMN, path)?;
    let last_name = find_column(&headers, LAST_NAME_COLUMN, path)?;
    let first_name = find_column(&headers, FIRST_NAME_COLUMN, path)?;
    let grade = find_column(&headers, GRADE_COLUMN, path)?;
    let nick_name = if has_nickname {
        Some(find_column(&headers, NICKNAME_COLUMN, path)?)
    } else {
        None
    };

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        if record.iter().all(str::is_empty) {
            continue;
        }
        students.push(Student::new(
            cell(school),
            cell(last_name),
            cell(first_name),
            nick_name.map_or("", cell),
            parse_grade(cell(grade), record_line(&record))?,
        ));
    }
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(content.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn test_read_portal_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "portal.csv",
            "School,Last Name,First Name,Nickname,Grade\n\
             Lee,Smith,Jonathan,Jon,9\n\
             Yorktown,Adams,Ann,,10\n",
        );

        let students = read_portal_roster(&path).expect("parse");
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].nick_name(), "Jon");
        assert_eq!(students[1].grade(), 10);
    }

    #[test]
    fn test_read_event_roster_without_nickname_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "event.csv",
            "School,Last Name,First Name,Grade\nLee,Smith,Jon,9\n",
        );

        let students = read_event_roster(&path).expect("parse");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].nick_name(), "");
    }

    #[test]
    fn test_extra_columns_and_reordering_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "event.csv",
            "Team,Grade,First Name,Last Name,School\nA,9,Jon,Smith,Lee\n",
        );

        let students = read_event_roster(&path).expect("parse");
        assert_eq!(students[0].school(), "Lee");
        assert_eq!(students[0].grade(), 9);
    }

    #[test]
    fn test_missing_column_is_reported_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "bad.csv", "School,Last Name,Grade\nLee,Smith,9\n");

        let err = read_event_roster(&path).unwrap_err();
        assert!(err.to_string().contains(FIRST_NAME_COLUMN));
    }

    #[test]
    fn test_non_numeric_grade_is_a_data_format_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "bad.csv",
            "School,Last Name,First Name,Grade\nLee,Smith,Jon,ninth\n",
        );

        assert!(matches!(
            read_event_roster(&path),
            Err(Error::DataFormat(_))
        ));
    }

    #[test]
    fn test_latest_roster_file_picks_newest_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "roster-2026-01-15.csv", "");
        write_file(dir.path(), "roster-2026-03-02.csv", "");
        write_file(dir.path(), "roster-2026-02-20.csv", "");

        let latest = latest_roster_file(dir.path()).expect("latest");
        assert!(latest.ends_with("roster-2026-03-02.csv"));
    }

    #[test]
    fn test_empty_directory_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            latest_roster_file(dir.path()),
            Err(Error::Config(_))
        ));
    }
}
