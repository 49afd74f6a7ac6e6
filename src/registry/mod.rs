//! Coach/school registry used for the unknown-school cross-check.
//!
//! The registry never affects matching; it only backs a warning when a
//! school shows up in either roster without a known coach.

use crate::error::Result;
use crate::model::{EventStudent, PortalStudent};
use crate::parsers::find_column;
use std::path::Path;

pub const SCHOOL_NAME_COLUMN: &str = "School Name";
pub const COACH_NAME_COLUMN: &str = "Coach Name";
pub const COACH_EMAIL_COLUMN: &str = "Head Coach Email";

/// One coach registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub name: String,
    pub email: String,
    pub school: String,
}

/// Read the coach registry CSV.
pub fn read_coaches(path: &Path) -> Result<Vec<Coach>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let school = find_column(&headers, SCHOOL_NAME_COLUMN, path)?;
    let name = find_column(&headers, COACH_NAME_COLUMN, path)?;
    let email = find_column(&headers, COACH_EMAIL_COLUMN, path)?;

    let mut coaches = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        if record.iter().all(str::is_empty) {
            continue;
        }
        coaches.push(Coach {
            name: cell(name),
            email: cell(email),
            school: cell(school),
        });
    }
    Ok(coaches)
}

/// Schools present in either roster but absent from the registry,
/// case-insensitively, each reported once in sorted order.
#[must_use]
pub fn unknown_schools(
    coaches: &[Coach],
    portal: &[PortalStudent],
    event: &[EventStudent],
) -> Vec<String> {
    let roster_schools = portal
        .iter()
        .map(|s| s.school())
        .chain(event.iter().map(|s| s.school()));

    let mut unknown: Vec<String> = Vec::new();
    for school in roster_schools {
        let known = coaches
            .iter()
            .any(|c| c.school.eq_ignore_ascii_case(school));
        let seen = unknown.iter().any(|u| u.eq_ignore_ascii_case(school));
        if !known && !seen {
            unknown.push(school.to_string());
        }
    }
    unknown.sort_unstable();
    unknown
}
