//! Reconciliation outcome structures.

use crate::model::{EventStudent, Match, PortalStudent, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-Event-record candidate grouping: distance value to the Portal
/// records at that distance, ascending, append-ordered within a group
/// (Portal roster input order).
pub type CandidateGroups = BTreeMap<u32, Vec<PortalStudent>>;

/// The dense candidate table surfaced for human adjudication: every
/// remaining Event record (even with an empty group map) against every
/// remaining Portal record. Ordered by [`crate::model::Student`] ordering.
pub type CandidateTable = BTreeMap<EventStudent, CandidateGroups>;

/// Complete result of one reconciliation run.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DiffOutcome {
    /// Exact matches recomputed this run plus adjudicated matches carried
    /// forward from the prior run's artifact
    pub matches: Vec<Match>,
    /// Candidate distances for everything still unresolved; advisory only
    /// within this run
    pub candidates: CandidateTable,
    /// Portal records with no Event counterpart, roster order
    pub portal_not_in_event: Vec<PortalStudent>,
    /// Event records with no Portal counterpart, roster order
    pub event_not_in_portal: Vec<EventStudent>,
    /// Summary statistics
    pub summary: DiffSummary,
}

impl DiffOutcome {
    /// Create a new empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate and update summary statistics
    pub fn calculate_summary(&mut self) {
        self.summary.exact_matches = self.matches_with_verdict(Verdict::ExactMatch).count();
        self.summary.marked_same = self.matches_with_verdict(Verdict::Same).count();
        self.summary.marked_different = self.matches_with_verdict(Verdict::Different).count();
        self.summary.portal_only = self.portal_not_in_event.len();
        self.summary.event_only = self.event_not_in_portal.len();
        self.summary.undecided_pairs = self
            .candidates
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum();
    }

    /// Iterate matches with the given verdict.
    pub fn matches_with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.verdict() == verdict)
    }

    /// Check whether everything reconciled: no unmatched records and no
    /// undecided candidate pairs.
    #[must_use]
    pub fn is_fully_reconciled(&self) -> bool {
        self.portal_not_in_event.is_empty()
            && self.event_not_in_portal.is_empty()
            && self.summary.undecided_pairs == 0
    }
}

/// Summary statistics for one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Pairs agreeing on all identity fields
    pub exact_matches: usize,
    /// Carried-forward pairs a human marked "Same"
    pub marked_same: usize,
    /// Carried-forward pairs a human marked "Different"
    pub marked_different: usize,
    /// Portal records not found in the Event system
    pub portal_only: usize,
    /// Event records not found in the Portal
    pub event_only: usize,
    /// Candidate pairs awaiting adjudication
    pub undecided_pairs: usize,
}
