//! Matched (Event, Portal) record pairs.

use super::{EventStudent, IdentityKey, PortalStudent, Verdict};
use serde::{Deserialize, Serialize};

/// One matched (Event record, Portal record) pair plus its verdict.
///
/// An `ExactMatch` pair's records are identity-field-equal; `Same` and
/// `Different` pairs come from human adjudication read back from a prior
/// run's artifact. A pair's cross-run identity is the identity-key tuple of
/// its two members, never object identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    event: EventStudent,
    portal: PortalStudent,
    distance: Option<u32>,
    verdict: Verdict,
}

impl Match {
    /// Create an exact match. Debug builds assert the identity-field
    /// invariant.
    #[must_use]
    pub fn exact(event: EventStudent, portal: PortalStudent) -> Self {
        debug_assert!(event.identity_eq(&portal));
        Self {
            event,
            portal,
            distance: None,
            verdict: Verdict::ExactMatch,
        }
    }

    /// Create an adjudicated match carried in from a prior run's artifact.
    #[must_use]
    pub fn adjudicated(
        event: EventStudent,
        portal: PortalStudent,
        distance: Option<u32>,
        verdict: Verdict,
    ) -> Self {
        Self {
            event,
            portal,
            distance,
            verdict,
        }
    }

    #[must_use]
    pub fn event(&self) -> &EventStudent {
        &self.event
    }

    #[must_use]
    pub fn portal(&self) -> &PortalStudent {
        &self.portal
    }

    /// The numeric distance recorded in the artifact, if any.
    #[must_use]
    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Cross-run identity of this pair.
    #[must_use]
    pub fn identity(&self) -> (IdentityKey, IdentityKey) {
        (self.event.identity_key(), self.portal.identity_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;

    fn pair() -> (EventStudent, PortalStudent) {
        (
            EventStudent(Student::new("Lee", "Smith", "Jon", "", 9)),
            PortalStudent(Student::new("LEE", "smith", "JON", "Jonny", 9)),
        )
    }

    #[test]
    fn test_exact_match_carries_verdict() {
        let (event, portal) = pair();
        let m = Match::exact(event, portal);
        assert_eq!(m.verdict(), Verdict::ExactMatch);
        assert_eq!(m.distance(), None);
    }

    #[test]
    fn test_identity_is_identity_key_pair() {
        let (event, portal) = pair();
        let m = Match::adjudicated(event.clone(), portal.clone(), Some(3), Verdict::Same);
        assert_eq!(m.identity(), (event.identity_key(), portal.identity_key()));
    }
}
