//! End-to-end reconciliation pipeline: parse inputs, compare, write
//! reports.

use crate::config::ReconcileConfig;
use crate::diff::{DiffOutcome, DifferenceEngine};
use crate::model::{EventStudent, Match, PortalStudent};
use crate::parsers;
use crate::registry;
use crate::reports::{timestamped_report_dir, ReportBuilder};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Everything a run consumes, parsed and ready for the engine.
pub struct RosterInputs {
    pub portal: Vec<PortalStudent>,
    pub event: Vec<EventStudent>,
    pub prior_matches: Vec<Match>,
}

/// Parse both rosters and the prior run's artifact.
pub fn load_inputs(config: &ReconcileConfig) -> Result<RosterInputs> {
    let prior_matches = parsers::parse_adjudication(&config.paths.master_report)
        .with_context(|| {
            format!(
                "failed to read prior adjudications from {}",
                config.paths.master_report.display()
            )
        })?;

    let portal = parsers::read_portal_roster(&config.paths.portal_roster).with_context(|| {
        format!(
            "failed to read Portal roster {}",
            config.paths.portal_roster.display()
        )
    })?;

    let event = parsers::read_latest_event_roster(&config.paths.event_roster_dir)
        .with_context(|| {
            format!(
                "failed to read Event roster from {}",
                config.paths.event_roster_dir.display()
            )
        })?;

    if !config.behavior.quiet {
        tracing::info!(
            portal = portal.len(),
            event = event.len(),
            prior_matches = prior_matches.len(),
            "Loaded rosters"
        );
    }

    Ok(RosterInputs {
        portal,
        event,
        prior_matches,
    })
}

/// Run one full reconciliation: load, cross-check, compare, report.
///
/// Returns the outcome so callers can inspect the summary (exit codes,
/// tests).
pub fn run_reconcile(config: &ReconcileConfig) -> Result<DiffOutcome> {
    let inputs = load_inputs(config)?;

    check_school_registry(config, &inputs)?;

    let engine = DifferenceEngine::new();
    let outcome = engine.compare(inputs.prior_matches, &inputs.portal, &inputs.event);

    if !config.behavior.quiet {
        let summary = &outcome.summary;
        tracing::info!(
            exact = summary.exact_matches,
            same = summary.marked_same,
            different = summary.marked_different,
            "Matches"
        );
        tracing::info!(
            portal_only = summary.portal_only,
            event_only = summary.event_only,
            undecided_pairs = summary.undecided_pairs,
            "Unresolved"
        );
    }

    write_reports(config, &outcome)?;
    Ok(outcome)
}

fn check_school_registry(config: &ReconcileConfig, inputs: &RosterInputs) -> Result<()> {
    let Some(coaches_file) = &config.paths.coaches_file else {
        return Ok(());
    };
    let coaches = registry::read_coaches(coaches_file).with_context(|| {
        format!("failed to read coach registry {}", coaches_file.display())
    })?;
    let unknown = registry::unknown_schools(&coaches, &inputs.portal, &inputs.event);
    for school in &unknown {
        tracing::warn!(school = %school, "School not in the coach registry");
    }
    Ok(())
}

fn write_reports(config: &ReconcileConfig, outcome: &DiffOutcome) -> Result<()> {
    let report_dir = resolve_report_dir(config)?;
    let builder = ReportBuilder::new(outcome, &config.paths.master_report, &report_dir);

    builder.write_master().with_context(|| {
        format!(
            "failed to write adjudication artifact {}",
            config.paths.master_report.display()
        )
    })?;
    builder
        .write_unmatched()
        .context("failed to write unmatched reports")?;

    if !config.output.no_school_reports {
        let written = builder
            .write_school_reports()
            .context("failed to write school reports")?;
        if !config.behavior.quiet {
            tracing::info!(
                count = written.len(),
                dir = %report_dir.display(),
                "Wrote school reports"
            );
        }
    }
    Ok(())
}

fn resolve_report_dir(config: &ReconcileConfig) -> Result<PathBuf> {
    match &config.output.report_dir {
        Some(dir) => Ok(dir.clone()),
        None => {
            let base = config
                .paths
                .master_report
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            Ok(timestamped_report_dir(base)?)
        }
    }
}
