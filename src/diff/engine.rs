//! Roster difference engine implementation.

use super::{CandidateGroups, DiffOutcome};
use crate::matching::{DistanceFunction, WeightedDistance};
use crate::model::{EventStudent, Match, PortalStudent, Verdict};
use rayon::prelude::*;

/// Reconciliation engine for comparing the two rosters.
///
/// One invocation of [`DifferenceEngine::compare`] consumes two complete
/// in-memory rosters plus the prior run's adjudicated matches and produces
/// one complete [`DiffOutcome`] in a single synchronous pass. The engine
/// holds no state across invocations, performs no I/O and does no logging;
/// it is a pure function of its inputs.
pub struct DifferenceEngine {
    distance: Box<dyn DistanceFunction>,
    parallel_threshold: usize,
}

impl DifferenceEngine {
    /// Remaining-Event-pool size above which the candidate table is
    /// computed with a rayon fan-out.
    const DEFAULT_PARALLEL_THRESHOLD: usize = 50;

    /// Create an engine with the supplied [`WeightedDistance`] metric.
    #[must_use]
    pub fn new() -> Self {
        Self {
            distance: Box::new(WeightedDistance::new()),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Use a custom distance metric.
    #[must_use]
    pub fn with_distance(mut self, distance: Box<dyn DistanceFunction>) -> Self {
        self.distance = distance;
        self
    }

    /// Override the parallel fan-out threshold (mainly for tests).
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Reconcile the two rosters against the prior run's adjudications.
    ///
    /// 1. Extract exact matches (identity-field equality). Ties are broken
    ///    by roster input order on both sides: pairing is greedy, so a
    ///    duplicate-identity group with `m` Event records and `n` Portal
    ///    records yields `min(m, n)` exact matches and leaves the remainder
    ///    in the pools for ordinary candidate evaluation.
    /// 2. Carry forward prior `Same`/`Different` matches whose two records
    ///    both still exist (by identity fields) in the current rosters;
    ///    drop the rest silently. Kept matches are rebound to the
    ///    current-roster record instances.
    /// 3. Compute the dense candidate-distance table over everything still
    ///    in the pools — no pruning, no thresholding.
    /// 4. Report the leftover pools as the two unmatched sets.
    pub fn compare(
        &self,
        prior_matches: Vec<Match>,
        portal: &[PortalStudent],
        event: &[EventStudent],
    ) -> DiffOutcome {
        let mut portal_pool: Vec<PortalStudent> = portal.to_vec();
        let mut event_pool: Vec<EventStudent> = event.to_vec();
        let mut outcome = DiffOutcome::new();

        Self::extract_exact_matches(&mut portal_pool, &mut event_pool, &mut outcome);
        Self::carry_forward(prior_matches, &mut portal_pool, &mut event_pool, &mut outcome);
        self.compute_candidates(&portal_pool, &event_pool, &mut outcome);

        outcome.portal_not_in_event = portal_pool;
        outcome.event_not_in_portal = event_pool;
        outcome.calculate_summary();
        outcome
    }

    /// Step 1: exact-match extraction, O(|S|·|P|) over the pools.
    fn extract_exact_matches(
        portal_pool: &mut Vec<PortalStudent>,
        event_pool: &mut Vec<EventStudent>,
        outcome: &mut DiffOutcome,
    ) {
        let mut event_idx = 0;
        while event_idx < event_pool.len() {
            let found = portal_pool
                .iter()
                .position(|p| p.identity_eq(&event_pool[event_idx]));
            match found {
                Some(portal_idx) => {
                    let event_rec = event_pool.remove(event_idx);
                    let portal_rec = portal_pool.remove(portal_idx);
                    outcome.matches.push(Match::exact(event_rec, portal_rec));
                }
                None => event_idx += 1,
            }
        }
    }

    /// Step 2: carry-forward reconciliation of prior adjudications.
    fn carry_forward(
        prior_matches: Vec<Match>,
        portal_pool: &mut Vec<PortalStudent>,
        event_pool: &mut Vec<EventStudent>,
        outcome: &mut DiffOutcome,
    ) {
        for prior in prior_matches {
            if !matches!(prior.verdict(), Verdict::Same | Verdict::Different) {
                // Exact matches are recomputed fresh every run.
                continue;
            }
            let event_idx = event_pool.iter().position(|s| s.identity_eq(prior.event()));
            let portal_idx = portal_pool
                .iter()
                .position(|p| p.identity_eq(prior.portal()));
            if let (Some(event_idx), Some(portal_idx)) = (event_idx, portal_idx) {
                let event_rec = event_pool.remove(event_idx);
                let portal_rec = portal_pool.remove(portal_idx);
                outcome.matches.push(Match::adjudicated(
                    event_rec,
                    portal_rec,
                    prior.distance(),
                    prior.verdict(),
                ));
            }
            // Either record gone from the current rosters: the prior match
            // is dropped and its surviving member re-enters the pool.
        }
    }

    /// Step 3: dense candidate-distance computation.
    ///
    /// Embarrassingly parallel across Event records; each record's group
    /// map is computed independently and the per-record results are folded
    /// in sequentially, so groupings and order are identical to the
    /// sequential path regardless of interleaving.
    fn compute_candidates(
        &self,
        portal_pool: &[PortalStudent],
        event_pool: &[EventStudent],
        outcome: &mut DiffOutcome,
    ) {
        let groups_for = |event_rec: &EventStudent| -> (EventStudent, CandidateGroups) {
            let mut groups = CandidateGroups::new();
            for portal_rec in portal_pool {
                let distance = self.distance.distance(event_rec, portal_rec);
                groups.entry(distance).or_default().push(portal_rec.clone());
            }
            (event_rec.clone(), groups)
        };

        let rows: Vec<(EventStudent, CandidateGroups)> =
            if event_pool.len() > self.parallel_threshold {
                event_pool.par_iter().map(groups_for).collect()
            } else {
                event_pool.iter().map(groups_for).collect()
            };

        for (event_rec, groups) in rows {
            outcome.candidates.insert(event_rec, groups);
        }
    }
}

impl Default for DifferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
