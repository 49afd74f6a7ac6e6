//! Round-trip reader for the adjudication artifact.
//!
//! A prior run's artifact is organized as row-groups: one Event-labeled row
//! followed by zero or more Portal-labeled rows, each carrying an optional
//! numeric distance and a tri-state verdict cell. Only rows a human marked
//! "Same" or "Different" become [`Match`]es; undecided rows are discarded.
//! The artifact is written by [`crate::reports::ReportBuilder`]; both sides
//! share the verdict vocabulary in [`crate::model::Verdict`], so the engine
//! depends on this narrow contract rather than on a rendering library.

use super::{
    find_column, parse_grade, record_line, DISTANCE_COLUMN, EVENT_ROW_LABEL, FIRST_NAME_COLUMN,
    GRADE_COLUMN, LAST_NAME_COLUMN, NICKNAME_COLUMN, PORTAL_ROW_LABEL, SCHOOL_COLUMN,
    SOURCE_COLUMN, VERDICT_COLUMN,
};
use crate::error::{Error, Result};
use crate::model::{EventStudent, Match, PortalStudent, Student, Verdict};
use std::io::Read;
use std::path::Path;

/// Parse the prior run's adjudication artifact.
///
/// A missing file is the first run, not an error: the result is an empty
/// match list. A verdict cell outside the tri-state vocabulary aborts with
/// [`Error::DataFormat`] before the engine executes.
pub fn parse_adjudication(path: &Path) -> Result<Vec<Match>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    parse_records(reader, path)
}

/// Parse an adjudication artifact from any reader (used by tests and by
/// callers that keep the artifact somewhere other than a local file).
pub fn parse_adjudication_reader<R: Read>(reader: R) -> Result<Vec<Match>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    parse_records(reader, Path::new("<adjudication artifact>"))
}

fn parse_records<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Vec<Match>> {
    let headers = reader.headers()?.clone();
    let source = find_column(&headers, SOURCE_COLUMN, path)?;
    let distance = find_column(&headers, DISTANCE_COLUMN, path)?;
    let school = find_column(&headers, SCHOOL_COLUMN, path)?;
    let last_name = find_column(&headers, LAST_NAME_COLUMN, path)?;
    let first_name = find_column(&headers, FIRST_NAME_COLUMN, path)?;
    let nick_name = find_column(&headers, NICKNAME_COLUMN, path)?;
    let grade = find_column(&headers, GRADE_COLUMN, path)?;
    let verdict = find_column(&headers, VERDICT_COLUMN, path)?;

    let mut matches = Vec::new();
    let mut current_event: Option<EventStudent> = None;

    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let line = record_line(&record);

        let student = || -> Result<Student> {
            Ok(Student::new(
                cell(school),
                cell(last_name),
                cell(first_name),
                cell(nick_name),
                parse_grade(cell(grade), line)?,
            ))
        };

        match cell(source) {
            EVENT_ROW_LABEL => {
                current_event = Some(EventStudent(student()?));
            }
            PORTAL_ROW_LABEL => {
                // Undecided rows are discarded; only human verdicts
                // reconstitute a Match.
                let Some(verdict) = Verdict::parse_cell(cell(verdict))? else {
                    continue;
                };
                let event = current_event.clone().ok_or_else(|| {
                    Error::data_format(format!(
                        "Portal row on line {line} precedes any Event row"
                    ))
                })?;
                let distance = parse_distance(cell(distance), line)?;
                matches.push(Match::adjudicated(
                    event,
                    PortalStudent(student()?),
                    distance,
                    verdict,
                ));
            }
            // Unrelated rows (section titles, other sheets pasted in) are
            // ignored.
            _ => {}
        }
    }
    Ok(matches)
}

fn parse_distance(cell: &str, line: u64) -> Result<Option<u32>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<u32>().map(Some).map_err(|_| {
        Error::data_format(format!("non-numeric distance '{cell}' on line {line}"))
    })
}
