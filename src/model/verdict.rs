//! Verdict classification and the sentinel lookup table.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Display string for a candidate pair nobody has adjudicated yet.
pub const UNDECIDED_LABEL: &str = "\u{2014}";

/// Classification state for a matched pair.
///
/// `ExactMatch` pairs are recomputed fresh every run from identity-field
/// equality. `Same` and `Different` arise only from human adjudication
/// recorded in a prior run's artifact and carried forward. Candidates with
/// no verdict yet have no `Verdict` value at all; they render as
/// [`UNDECIDED_LABEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The two records agree on all identity fields
    ExactMatch,
    /// A human decided the pair denotes the same person
    Same,
    /// A human decided the pair denotes different people
    Different,
}

impl Verdict {
    /// All verdicts, in sentinel order.
    pub const ALL: [Self; 3] = [Self::ExactMatch, Self::Different, Self::Same];

    /// Sentinel distance keying this verdict in the display map of the
    /// adjudication artifact. `ExactMatch` never appears there; its
    /// sentinel exists only so every verdict has a distinct key.
    ///
    /// `Same` deliberately shares the key 0 with a computed candidate at
    /// true distance zero: a zero weighted distance is rendered "Same" and
    /// round-trips as adjudicated on the next run.
    #[must_use]
    pub const fn sentinel(self) -> i64 {
        match self {
            Self::ExactMatch => -2,
            Self::Different => -1,
            Self::Same => 0,
        }
    }

    /// Display string written to the artifact's verdict column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExactMatch => "Exact match",
            Self::Same => "Same",
            Self::Different => "Different",
        }
    }

    /// Look a verdict up by its sentinel distance.
    #[must_use]
    pub fn from_sentinel(distance: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.sentinel() == distance)
    }

    /// Tri-state display for one row of the candidate/match table: "Same"
    /// or "Different" when the distance is a verdict sentinel, otherwise
    /// [`UNDECIDED_LABEL`]. `ExactMatch` is never rendered through this
    /// table.
    #[must_use]
    pub fn display_for_distance(distance: Option<i64>) -> &'static str {
        match distance {
            Some(d) if d == Self::Same.sentinel() => Self::Same.label(),
            Some(d) if d == Self::Different.sentinel() => Self::Different.label(),
            _ => UNDECIDED_LABEL,
        }
    }

    /// Parse an artifact verdict cell.
    ///
    /// Blank and [`UNDECIDED_LABEL`] mean "still undecided" and yield
    /// `Ok(None)`. Anything outside the tri-state vocabulary is a
    /// [`Error::DataFormat`]: parsing aborts rather than guessing.
    pub fn parse_cell(cell: &str) -> Result<Option<Self>> {
        match cell.trim() {
            "" | UNDECIDED_LABEL => Ok(None),
            s if s == Self::Same.label() => Ok(Some(Self::Same)),
            s if s == Self::Different.label() => Ok(Some(Self::Different)),
            other => Err(Error::data_format(format!(
                "unknown verdict '{other}' (expected one of \"{}\", \"{}\", \"{}\")",
                UNDECIDED_LABEL,
                Self::Different.label(),
                Self::Same.label(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_distinct() {
        let mut sentinels: Vec<i64> = Verdict::ALL.iter().map(|v| v.sentinel()).collect();
        sentinels.sort_unstable();
        sentinels.dedup();
        assert_eq!(sentinels.len(), Verdict::ALL.len());
    }

    #[test]
    fn test_from_sentinel_round_trips() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_sentinel(verdict.sentinel()), Some(verdict));
        }
        assert_eq!(Verdict::from_sentinel(7), None);
    }

    #[test]
    fn test_display_for_distance() {
        assert_eq!(Verdict::display_for_distance(Some(0)), "Same");
        assert_eq!(Verdict::display_for_distance(Some(-1)), "Different");
        assert_eq!(Verdict::display_for_distance(Some(5)), UNDECIDED_LABEL);
        assert_eq!(Verdict::display_for_distance(None), UNDECIDED_LABEL);
    }

    #[test]
    fn test_parse_cell_known_values() {
        assert_eq!(Verdict::parse_cell("Same").unwrap(), Some(Verdict::Same));
        assert_eq!(
            Verdict::parse_cell("Different").unwrap(),
            Some(Verdict::Different)
        );
        assert_eq!(Verdict::parse_cell(UNDECIDED_LABEL).unwrap(), None);
        assert_eq!(Verdict::parse_cell("").unwrap(), None);
        assert_eq!(Verdict::parse_cell("  Same ").unwrap(), Some(Verdict::Same));
    }

    #[test]
    fn test_parse_cell_rejects_unknown_value() {
        let err = Verdict::parse_cell("Maybe").unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)));
        assert!(err.to_string().contains("Maybe"));
    }
}
