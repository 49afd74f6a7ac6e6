//! CSV report builder.

use super::{EVENT_NOT_PORTAL_FILE, PORTAL_NOT_EVENT_FILE};
use crate::diff::DiffOutcome;
use crate::error::{Error, Result};
use crate::model::{EventStudent, PortalStudent, Student, Verdict};
use crate::parsers::{
    DISTANCE_COLUMN, EVENT_ROW_LABEL, FIRST_NAME_COLUMN, GRADE_COLUMN, LAST_NAME_COLUMN,
    NICKNAME_COLUMN, PORTAL_ROW_LABEL, SCHOOL_COLUMN, SOURCE_COLUMN, VERDICT_COLUMN,
};
use chrono::Local;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

const STUDENT_HEADINGS: [&str; 5] = [
    SCHOOL_COLUMN,
    LAST_NAME_COLUMN,
    FIRST_NAME_COLUMN,
    NICKNAME_COLUMN,
    GRADE_COLUMN,
];

/// Writes the reconciliation reports for one [`DiffOutcome`].
///
/// `write_master` produces the adjudication artifact that
/// [`crate::parsers::parse_adjudication`] reads back on the next run; the
/// two sides share the column names in [`crate::parsers`] and the verdict
/// vocabulary in [`Verdict`].
pub struct ReportBuilder<'a> {
    outcome: &'a DiffOutcome,
    master_path: PathBuf,
    report_dir: PathBuf,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(
        outcome: &'a DiffOutcome,
        master_path: impl Into<PathBuf>,
        report_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            outcome,
            master_path: master_path.into(),
            report_dir: report_dir.into(),
        }
    }

    /// Write the adjudication artifact.
    ///
    /// Candidate groups and carried-forward `Same`/`Different` matches are
    /// merged into one display map per Event record, the matches keyed at
    /// their verdict sentinel so they sort ahead of real distances and
    /// render their verdict string. Exact matches are never shown — they
    /// are already known to be the same person and need no human judgment.
    pub fn write_master(&self) -> Result<()> {
        let mut display: BTreeMap<&EventStudent, BTreeMap<i64, Vec<&PortalStudent>>> =
            BTreeMap::new();

        for (event_rec, groups) in &self.outcome.candidates {
            let entry = display.entry(event_rec).or_default();
            for (distance, portals) in groups {
                entry
                    .entry(i64::from(*distance))
                    .or_default()
                    .extend(portals.iter());
            }
        }
        for m in &self.outcome.matches {
            if m.verdict() == Verdict::ExactMatch {
                continue;
            }
            display
                .entry(m.event())
                .or_default()
                .entry(m.verdict().sentinel())
                .or_default()
                .push(m.portal());
        }

        let mut writer = csv::Writer::from_path(&self.master_path)?;
        writer.write_record([
            SOURCE_COLUMN,
            DISTANCE_COLUMN,
            SCHOOL_COLUMN,
            LAST_NAME_COLUMN,
            FIRST_NAME_COLUMN,
            NICKNAME_COLUMN,
            GRADE_COLUMN,
            VERDICT_COLUMN,
        ])?;

        for (event_rec, groups) in &display {
            write_event_row(&mut writer, event_rec)?;
            for (distance, portals) in groups {
                for portal_rec in portals {
                    write_portal_row(&mut writer, *distance, portal_rec)?;
                }
            }
        }
        writer.flush().map_err(|e| Error::io(&self.master_path, e))?;
        Ok(())
    }

    /// Write the two "only in one system" reports into the report
    /// directory.
    pub fn write_unmatched(&self) -> Result<()> {
        self.create_report_dir()?;

        let portal_path = self.report_dir.join(PORTAL_NOT_EVENT_FILE);
        let mut writer = csv::Writer::from_path(&portal_path)?;
        writer.write_record(STUDENT_HEADINGS)?;
        for student in &self.outcome.portal_not_in_event {
            write_student_row(&mut writer, student, student.nick_name())?;
        }
        writer.flush().map_err(|e| Error::io(&portal_path, e))?;

        let event_path = self.report_dir.join(EVENT_NOT_PORTAL_FILE);
        let mut writer = csv::Writer::from_path(&event_path)?;
        writer.write_record(STUDENT_HEADINGS)?;
        for student in &self.outcome.event_not_in_portal {
            write_student_row(&mut writer, student, "")?;
        }
        writer.flush().map_err(|e| Error::io(&event_path, e))?;
        Ok(())
    }

    /// Write one CSV per school that has Event records with no Portal
    /// counterpart (those students are missing a Portal permission and the
    /// school's coaches need to act). Returns the paths written.
    pub fn write_school_reports(&self) -> Result<Vec<PathBuf>> {
        self.create_report_dir()?;

        let mut schools: Vec<&str> = Vec::new();
        for student in &self.outcome.event_not_in_portal {
            if !schools
                .iter()
                .any(|s| s.eq_ignore_ascii_case(student.school()))
            {
                schools.push(student.school());
            }
        }
        schools.sort_unstable();

        let mut written = Vec::new();
        for school in schools {
            let path = self.report_dir.join(school_file_name(school));
            self.write_school_report(school, &path)?;
            written.push(path);
        }
        Ok(written)
    }

    fn write_school_report(&self, school: &str, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record(STUDENT_HEADINGS)?;

        writer.write_record(["Event students with no Portal permission:"])?;
        for student in &self.outcome.event_not_in_portal {
            if student.school().eq_ignore_ascii_case(school) {
                write_student_row(&mut writer, student, "")?;
            }
        }

        writer.write_record([""])?;
        writer.write_record(["Portal students not in the Event tool (FYI - no action required):"])?;
        for student in &self.outcome.portal_not_in_event {
            if student.school().eq_ignore_ascii_case(school) {
                write_student_row(&mut writer, student, student.nick_name())?;
            }
        }
        writer.flush().map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    fn create_report_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.report_dir).map_err(|e| Error::io(&self.report_dir, e))
    }
}

fn write_event_row<W: Write>(writer: &mut csv::Writer<W>, student: &Student) -> Result<()> {
    let grade = student.grade().to_string();
    writer.write_record([
        EVENT_ROW_LABEL,
        "",
        student.school(),
        student.last_name(),
        student.first_name(),
        "",
        grade.as_str(),
        "",
    ])?;
    Ok(())
}

fn write_portal_row<W: Write>(
    writer: &mut csv::Writer<W>,
    distance: i64,
    student: &Student,
) -> Result<()> {
    // Verdict sentinels are negative (except Same's 0) and render a blank
    // distance cell; real distances are written through.
    let distance_cell = if distance < 0 {
        String::new()
    } else {
        distance.to_string()
    };
    let grade = student.grade().to_string();
    writer.write_record([
        PORTAL_ROW_LABEL,
        distance_cell.as_str(),
        student.school(),
        student.last_name(),
        student.first_name(),
        student.nick_name(),
        grade.as_str(),
        Verdict::display_for_distance(Some(distance)),
    ])?;
    Ok(())
}

fn write_student_row<W: Write>(
    writer: &mut csv::Writer<W>,
    student: &Student,
    nick_name: &str,
) -> Result<()> {
    let grade = student.grade().to_string();
    writer.write_record([
        student.school(),
        student.last_name(),
        student.first_name(),
        nick_name,
        grade.as_str(),
    ])?;
    Ok(())
}

/// File name for a school report: dots removed, spaces dashed.
fn school_file_name(school: &str) -> String {
    let name: String = school
        .chars()
        .filter(|&ch| ch != '.')
        .map(|ch| if ch == ' ' { '-' } else { ch })
        .collect();
    format!("{name}.csv")
}

/// Timestamped directory for this run's reports. Refuses to reuse an
/// existing directory so a run never mixes its output with an older one.
pub fn timestamped_report_dir(base: &Path) -> Result<PathBuf> {
    let name = Local::now().format("reports-%Y-%m-%d_%H-%M-%S").to_string();
    let dir = base.join(name);
    if dir.exists() {
        return Err(Error::report(format!(
            "report directory '{}' already exists",
            dir.display()
        )));
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceEngine;
    use crate::model::Match;

    fn event(school: &str, last: &str, first: &str, grade: i32) -> EventStudent {
        EventStudent(Student::new(school, last, first, "", grade))
    }

    fn portal(school: &str, last: &str, first: &str, nick: &str, grade: i32) -> PortalStudent {
        PortalStudent(Student::new(school, last, first, nick, grade))
    }

    fn sample_outcome() -> DiffOutcome {
        let events = vec![event("Lee", "Smith", "Jon", 9), event("Lee", "Adams", "Ann", 10)];
        let portals = vec![
            portal("Lee", "Smith", "Jonathan", "Jon", 9),
            portal("Yorktown", "Baker", "Bo", "", 11),
        ];
        DifferenceEngine::new().compare(Vec::new(), &portals, &events)
    }

    #[test]
    fn test_master_report_round_trips_adjudications() {
        let events = vec![event("Lee", "Smith", "Jon", 9)];
        let portals = vec![portal("Lee", "Smith", "Jonathan", "Jon", 9)];
        let prior = vec![Match::adjudicated(
            events[0].clone(),
            portals[0].clone(),
            Some(0),
            Verdict::Same,
        )];
        let outcome = DifferenceEngine::new().compare(prior, &portals, &events);

        let dir = tempfile::tempdir().expect("tempdir");
        let master = dir.path().join("master-report.csv");
        ReportBuilder::new(&outcome, &master, dir.path().join("reports"))
            .write_master()
            .expect("write");

        let reparsed = crate::parsers::parse_adjudication(&master).expect("reparse");
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0].verdict(), Verdict::Same);
        assert!(reparsed[0].event().identity_eq(&events[0]));
    }

    #[test]
    fn test_master_report_groups_candidates_under_event_rows() {
        let outcome = sample_outcome();
        let dir = tempfile::tempdir().expect("tempdir");
        let master = dir.path().join("master-report.csv");
        ReportBuilder::new(&outcome, &master, dir.path().join("reports"))
            .write_master()
            .expect("write");

        let content = std::fs::read_to_string(&master).expect("read back");
        let lines: Vec<&str> = content.lines().collect();
        // Header, then two row-groups of one Event row + two Portal rows.
        assert_eq!(lines.len(), 1 + 2 * 3);
        assert!(lines[1].starts_with(EVENT_ROW_LABEL));
        assert!(lines[2].starts_with(PORTAL_ROW_LABEL));
    }

    #[test]
    fn test_unmatched_reports_list_leftover_records() {
        let outcome = sample_outcome();
        let dir = tempfile::tempdir().expect("tempdir");
        let reports = dir.path().join("reports");
        ReportBuilder::new(&outcome, dir.path().join("master.csv"), &reports)
            .write_unmatched()
            .expect("write");

        let event_only =
            std::fs::read_to_string(reports.join(EVENT_NOT_PORTAL_FILE)).expect("read");
        let portal_only =
            std::fs::read_to_string(reports.join(PORTAL_NOT_EVENT_FILE)).expect("read");
        assert!(event_only.contains("Smith"));
        assert!(event_only.contains("Adams"));
        assert!(portal_only.contains("Baker"));
    }

    #[test]
    fn test_school_reports_only_for_schools_with_event_only_records() {
        let outcome = sample_outcome();
        let dir = tempfile::tempdir().expect("tempdir");
        let reports = dir.path().join("reports");
        let written = ReportBuilder::new(&outcome, dir.path().join("master.csv"), &reports)
            .write_school_reports()
            .expect("write");

        // Only "Lee" has Event-only records; "Yorktown" has Portal-only.
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("Lee.csv"));
        let content = std::fs::read_to_string(&written[0]).expect("read");
        assert!(content.contains("no Portal permission"));
    }

    #[test]
    fn test_school_file_name_sanitization() {
        assert_eq!(school_file_name("St. Mary Middle"), "St-Mary-Middle.csv");
    }

    #[test]
    fn test_timestamped_report_dir_is_under_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report_dir = timestamped_report_dir(dir.path()).expect("fresh dir");
        assert!(report_dir.starts_with(dir.path()));
        assert!(report_dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("reports-")));
    }
}
