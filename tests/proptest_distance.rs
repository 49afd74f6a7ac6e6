//! Property-based tests for the supplied distance metric.
//!
//! Verifies the metric laws the engine relies on — symmetry, zero
//! self-distance, determinism — across random records.

use proptest::prelude::*;
use roster_diff::{DistanceFunction, Student, WeightedDistance};

prop_compose! {
    fn arb_student()(
        school in "[A-Za-z .]{1,16}",
        last in "[A-Za-z'-]{1,12}",
        first in "[A-Za-z]{1,12}",
        nick in "[A-Za-z]{0,8}",
        grade in 0..=12i32,
    ) -> Student {
        Student::new(school, last, first, nick, grade)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn distance_is_symmetric(a in arb_student(), b in arb_student()) {
        let metric = WeightedDistance::new();
        prop_assert_eq!(metric.distance(&a, &b), metric.distance(&b, &a));
    }

    #[test]
    fn self_distance_is_zero(a in arb_student()) {
        let metric = WeightedDistance::new();
        prop_assert_eq!(metric.distance(&a, &a), 0);
    }

    #[test]
    fn distance_is_deterministic(a in arb_student(), b in arb_student()) {
        let metric = WeightedDistance::new();
        prop_assert_eq!(metric.distance(&a, &b), metric.distance(&a, &b));
    }

    #[test]
    fn distance_ignores_case(a in arb_student(), b in arb_student()) {
        let metric = WeightedDistance::new();
        let shouted = Student::new(
            a.school().to_uppercase(),
            a.last_name().to_uppercase(),
            a.first_name().to_uppercase(),
            a.nick_name().to_uppercase(),
            a.grade(),
        );
        prop_assert_eq!(metric.distance(&a, &b), metric.distance(&shouted, &b));
    }

    #[test]
    fn identity_equal_twin_without_nickname_is_at_distance_zero(
        a in arb_student(),
    ) {
        let twin = Student::new(a.school(), a.last_name(), a.first_name(), "", a.grade());
        let metric = WeightedDistance::new();
        prop_assert!(a.identity_eq(&twin));
        // School, last and grade terms are all zero, and the first-name
        // term's direct comparison is zero, so the minimum is zero
        // regardless of the nickname.
        prop_assert_eq!(metric.distance(&a, &twin), 0);
    }
}
