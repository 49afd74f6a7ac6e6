//! Student records and identity-field equality.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Identity-bearing data for one student as seen by one system.
///
/// Immutable once constructed from input data: fields are private and there
/// are no mutators. All field comparisons are case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    school: String,
    last_name: String,
    first_name: String,
    nick_name: String,
    grade: i32,
}

impl Student {
    /// Create a student record, trimming surrounding whitespace from all
    /// string fields.
    pub fn new(
        school: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        nick_name: impl Into<String>,
        grade: i32,
    ) -> Self {
        fn trimmed(value: impl Into<String>) -> String {
            let value: String = value.into();
            value.trim().to_string()
        }
        Self {
            school: trimmed(school),
            last_name: trimmed(last_name),
            first_name: trimmed(first_name),
            nick_name: trimmed(nick_name),
            grade,
        }
    }

    #[must_use]
    pub fn school(&self) -> &str {
        &self.school
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Nickname, empty when the source system has none.
    #[must_use]
    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }

    #[must_use]
    pub fn grade(&self) -> i32 {
        self.grade
    }

    /// The case-folded identity fields (school, last name, first name,
    /// grade) used for exact-match detection and for re-identifying a
    /// record across runs. Nickname does not participate: the Event system
    /// has no nickname field, so including it would make exact matches
    /// impossible for any student with a Portal nickname.
    #[must_use]
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            school: self.school.to_lowercase(),
            last_name: self.last_name.to_lowercase(),
            first_name: self.first_name.to_lowercase(),
            grade: self.grade,
        }
    }

    /// Test identity-field equality with another record.
    #[must_use]
    pub fn identity_eq(&self, other: &Self) -> bool {
        self.grade == other.grade
            && eq_ci(&self.school, &other.school)
            && eq_ci(&self.last_name, &other.last_name)
            && eq_ci(&self.first_name, &other.first_name)
    }
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.identity_eq(other) && eq_ci(&self.nick_name, &other.nick_name)
    }
}

impl Eq for Student {}

impl Ord for Student {
    /// Case-insensitive ordering by (school, last, first, grade, nickname),
    /// so report row-groups and the candidate table iterate
    /// deterministically.
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_ci(&self.school, &other.school)
            .then_with(|| cmp_ci(&self.last_name, &other.last_name))
            .then_with(|| cmp_ci(&self.first_name, &other.first_name))
            .then_with(|| self.grade.cmp(&other.grade))
            .then_with(|| cmp_ci(&self.nick_name, &other.nick_name))
    }
}

impl PartialOrd for Student {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({}, grade {})",
            self.last_name, self.first_name, self.school, self.grade
        )
    }
}

/// Case-folded identity-field tuple.
///
/// Object identity does not survive a run boundary — every run re-reads
/// fresh records — so this key is the cross-run identity of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey {
    school: String,
    last_name: String,
    first_name: String,
    grade: i32,
}

/// A student as registered in the Portal (System P).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct PortalStudent(pub Student);

/// A student as entered in the Event management tool (System S).
///
/// The Event system carries no nickname; the field is always empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct EventStudent(pub Student);

impl Deref for PortalStudent {
    type Target = Student;

    fn deref(&self) -> &Student {
        &self.0
    }
}

impl Deref for EventStudent {
    type Target = Student;

    fn deref(&self) -> &Student {
        &self.0
    }
}

impl From<Student> for PortalStudent {
    fn from(student: Student) -> Self {
        Self(student)
    }
}

impl From<Student> for EventStudent {
    fn from(student: Student) -> Self {
        Self(student)
    }
}

impl fmt::Display for PortalStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EventStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(school: &str, last: &str, first: &str, nick: &str, grade: i32) -> Student {
        Student::new(school, last, first, nick, grade)
    }

    #[test]
    fn test_new_trims_whitespace() {
        let s = student("  Lee ", " Smith", "Jon ", "", 9);
        assert_eq!(s.school(), "Lee");
        assert_eq!(s.last_name(), "Smith");
        assert_eq!(s.first_name(), "Jon");
    }

    #[test]
    fn test_identity_eq_is_case_insensitive() {
        let a = student("Lee", "Smith", "Jon", "", 9);
        let b = student("LEE", "smith", "JON", "Jonny", 9);
        assert!(a.identity_eq(&b));
    }

    #[test]
    fn test_identity_eq_excludes_nickname() {
        let a = student("Lee", "Smith", "Jon", "", 9);
        let b = student("Lee", "Smith", "Jon", "Jonny", 9);
        assert!(a.identity_eq(&b));
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_identity_eq_requires_same_grade() {
        let a = student("Lee", "Smith", "Jon", "", 9);
        let b = student("Lee", "Smith", "Jon", "", 10);
        assert!(!a.identity_eq(&b));
    }

    #[test]
    fn test_ordering_groups_by_school_then_name() {
        let mut students = vec![
            student("Yorktown", "Adams", "Ann", "", 9),
            student("Lee", "Baker", "Bo", "", 10),
            student("lee", "Adams", "Zed", "", 9),
        ];
        students.sort();
        assert_eq!(students[0].last_name(), "Adams");
        assert_eq!(students[0].school(), "lee");
        assert_eq!(students[1].last_name(), "Baker");
        assert_eq!(students[2].school(), "Yorktown");
    }

    #[test]
    fn test_identity_key_survives_reparse() {
        // Two independently constructed records with the same identity
        // fields must re-identify each other across a run boundary.
        let run1 = student("Lee", "Smith", "Jon", "", 9);
        let run2 = student("lee", "SMITH", "jon", "", 9);
        assert_eq!(run1.identity_key(), run2.identity_key());
    }
}
