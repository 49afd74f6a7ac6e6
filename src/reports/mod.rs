//! Report generation for reconciliation outcomes.
//!
//! Three surfaces, all CSV:
//! - the adjudication artifact (the "master report") — read back as prior
//!   matches by the next run,
//! - the two "only in one system" reports,
//! - per-school reports for coaches, in a timestamped report directory.

mod builder;

pub use builder::{timestamped_report_dir, ReportBuilder};

/// File name of the Portal-only report inside the report directory.
pub const PORTAL_NOT_EVENT_FILE: &str = "portal-not-in-event.csv";
/// File name of the Event-only report inside the report directory.
pub const EVENT_NOT_PORTAL_FILE: &str = "event-not-in-portal.csv";
