//! roster-diff: roster reconciliation and adjudication tool
//!
//! Reconciles the registration Portal roster against the local Event tool
//! roster, carrying human adjudications forward from run to run.

use anyhow::Result;
use clap::{Parser, Subcommand};
use roster_diff::cli;
use roster_diff::config::{BehaviorConfig, InputPaths, OutputConfig, ReconcileConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-diff")]
#[command(version)]
#[command(about = "Roster reconciliation and adjudication tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Run completed
    1  Unmatched records remain (with --fail-on-unmatched)

WORKFLOW:
    Each run reads the adjudication artifact produced by the previous run,
    keeps every pair a human marked Same or Different, and regenerates the
    artifact with everything still undecided. Mark verdicts in the Verdict
    column and re-run; the unresolved set narrows over iterations.")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `reconcile` subcommand
#[derive(Parser)]
struct ReconcileArgs {
    /// Path to the Portal roster export
    #[arg(long, env = "ROSTER_DIFF_PORTAL_ROSTER")]
    portal_roster: PathBuf,

    /// Directory of dated Event roster exports (the newest file is used)
    #[arg(long, env = "ROSTER_DIFF_EVENT_ROSTER_DIR")]
    event_roster_dir: PathBuf,

    /// The adjudication artifact: read for prior verdicts, rewritten at the
    /// end of the run
    #[arg(long, env = "ROSTER_DIFF_MASTER_REPORT")]
    master_report: PathBuf,

    /// Coach registry CSV for the unknown-school warning
    #[arg(long)]
    coaches: Option<PathBuf>,

    /// Report directory (default: a timestamped directory next to the
    /// master report)
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Skip the per-school reports
    #[arg(long)]
    no_school_reports: bool,

    /// Exit with code 1 if unmatched records remain
    #[arg(long)]
    fail_on_unmatched: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the adjudication artifact
    master_report: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the two rosters and regenerate the reports
    Reconcile(ReconcileArgs),

    /// Check that an adjudication artifact parses and summarize it
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Reconcile(args) => {
            let config = ReconcileConfig {
                paths: InputPaths {
                    portal_roster: args.portal_roster,
                    event_roster_dir: args.event_roster_dir,
                    master_report: args.master_report,
                    coaches_file: args.coaches,
                },
                output: OutputConfig {
                    report_dir: args.report_dir,
                    no_school_reports: args.no_school_reports,
                },
                behavior: BehaviorConfig {
                    quiet: cli.quiet,
                    fail_on_unmatched: args.fail_on_unmatched,
                },
            };

            let exit_code = cli::run_reconcile(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Validate(args) => {
            let exit_code = cli::run_validate(&args.master_report)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}
