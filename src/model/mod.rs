//! Core roster data structures.
//!
//! The model is shared by both source systems: the registration Portal
//! (System P) and the local Event management tool (System S). Provenance is
//! carried in the type system via the [`PortalStudent`] and [`EventStudent`]
//! newtypes, so records from the two systems never mix except as distance
//! comparison operands.

mod matched;
mod student;
mod verdict;

pub use matched::Match;
pub use student::{EventStudent, IdentityKey, PortalStudent, Student};
pub use verdict::{Verdict, UNDECIDED_LABEL};
