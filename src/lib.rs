//! **A library for reconciling two independently maintained student rosters.**
//!
//! `roster-diff` compares the roster of a registration **Portal** (System P)
//! against the roster of a local **Event** management tool (System S),
//! finding students present in only one system and deciding, for
//! near-identical-but-not-textually-identical entries, whether they denote
//! the same person.
//!
//! Fully automating that decision is not possible — ambiguous near-ties
//! need a human who knows both rosters — so the tool is built around a
//! human-in-the-loop adjudication cycle. Each run:
//!
//! 1. pairs off records that agree on all identity fields (school, last
//!    name, first name, grade, compared case-insensitively),
//! 2. carries forward every pair a human marked *Same* or *Different* in
//!    the previous run's artifact,
//! 3. computes a weighted fuzzy distance from every remaining Event record
//!    to every remaining Portal record and groups the candidates by
//!    distance for the adjudicator, and
//! 4. reports the records still unmatched on each side.
//!
//! The adjudication artifact the run writes is the same file the next run
//! reads, so the unresolved set narrows over iterations.
//!
//! ## Core modules
//!
//! - [`model`]: [`Student`], the provenance newtypes [`PortalStudent`] and
//!   [`EventStudent`], [`Verdict`] and [`Match`].
//! - [`matching`]: the [`DistanceFunction`] trait and the supplied
//!   [`WeightedDistance`] metric.
//! - [`diff`]: the [`DifferenceEngine`] and its [`DiffOutcome`].
//! - [`parsers`]: roster readers and the round-trip artifact reader.
//! - [`reports`]: the artifact writer and the unmatched/per-school reports.
//! - [`pipeline`]: the end-to-end run used by the CLI.
//!
//! ## Example
//!
//! ```
//! use roster_diff::{DifferenceEngine, EventStudent, PortalStudent, Student};
//!
//! let event = vec![EventStudent(Student::new("Lee", "Smith", "Jon", "", 9))];
//! let portal = vec![PortalStudent(Student::new(
//!     "Lee", "Smith", "Jonathan", "Jon", 9,
//! ))];
//!
//! let outcome = DifferenceEngine::new().compare(Vec::new(), &portal, &event);
//!
//! // Not an exact match (first names differ literally), but the nickname
//! // aliasing puts the pair alone in the distance-0 candidate group.
//! assert_eq!(outcome.summary.exact_matches, 0);
//! let groups = outcome.candidates.values().next().unwrap();
//! assert_eq!(groups[&0].len(), 1);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod matching;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod registry;
pub mod reports;

// Re-export main types for convenience
pub use diff::{CandidateGroups, CandidateTable, DiffOutcome, DiffSummary, DifferenceEngine};
pub use error::{Error, Result};
pub use matching::{DistanceFunction, WeightedDistance};
pub use model::{EventStudent, IdentityKey, Match, PortalStudent, Student, Verdict};
pub use parsers::{parse_adjudication, read_latest_event_roster, read_portal_roster};
pub use reports::ReportBuilder;
