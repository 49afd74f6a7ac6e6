//! Roster reconciliation engine.

mod engine;
mod outcome;

pub use engine::DifferenceEngine;
pub use outcome::{CandidateGroups, CandidateTable, DiffOutcome, DiffSummary};
