//! Input readers: roster CSVs and the adjudication artifact.
//!
//! All readers are header-based — columns are located by name, so extra
//! columns and column reordering in the inputs are ignored rather than
//! breaking parsing.

pub mod adjudication;
pub mod roster;

pub use adjudication::{parse_adjudication, parse_adjudication_reader};
pub use roster::{
    latest_roster_file, read_event_roster, read_latest_event_roster, read_portal_roster,
};

use crate::error::{Error, Result};
use std::path::Path;

// Column headings shared by the roster readers, the artifact reader and the
// report writer. Kept in one place to prevent format drift.
pub const SCHOOL_COLUMN: &str = "School";
pub const LAST_NAME_COLUMN: &str = "Last Name";
pub const FIRST_NAME_COLUMN: &str = "First Name";
pub const NICKNAME_COLUMN: &str = "Nickname";
pub const GRADE_COLUMN: &str = "Grade";
pub const SOURCE_COLUMN: &str = "Source";
pub const DISTANCE_COLUMN: &str = "Distance";
pub const VERDICT_COLUMN: &str = "Verdict";

/// Row-group marker for an Event-labeled row in the adjudication artifact.
pub const EVENT_ROW_LABEL: &str = "Event:";
/// Row-group marker for a Portal-labeled row in the adjudication artifact.
pub const PORTAL_ROW_LABEL: &str = "Portal:";

/// Locate a named column in a header row.
pub(crate) fn find_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::missing_column(name, path))
}

/// Parse a grade cell, naming the offending line on failure.
pub(crate) fn parse_grade(cell: &str, line: u64) -> Result<i32> {
    cell.trim()
        .parse::<i32>()
        .map_err(|_| Error::data_format(format!("non-numeric grade '{cell}' on line {line}")))
}

/// The 1-based line a record came from, best-effort.
pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}
