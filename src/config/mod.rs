//! Runtime configuration for the roster-diff binary.
//!
//! These structs are assembled from CLI arguments in `main` and handed to
//! the `cli::run_*` handlers; the library itself never reads them.

use std::path::PathBuf;

/// Full configuration for a `reconcile` run.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    pub paths: InputPaths,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Where the inputs live.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Portal roster export
    pub portal_roster: PathBuf,
    /// Directory of dated Event roster exports; the newest is used
    pub event_roster_dir: PathBuf,
    /// The adjudication artifact: read as prior matches, rewritten at the
    /// end of the run
    pub master_report: PathBuf,
    /// Optional coach registry for the unknown-school warning
    pub coaches_file: Option<PathBuf>,
}

/// Where the outputs go.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Report directory; a timestamped directory next to the master report
    /// when not set
    pub report_dir: Option<PathBuf>,
    /// Skip the per-school reports
    pub no_school_reports: bool,
}

/// Run behavior toggles.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit nonzero when unmatched records remain (CI mode)
    pub fail_on_unmatched: bool,
}
