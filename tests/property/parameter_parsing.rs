//! Textual overrides parse back to the value they were printed from

use framekit::parameter::Parameter;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_int_override_round_trips(value in any::<i64>()) {
        let mut p = Parameter::range_int("demo.n", "n", None, 0, -10, 10);
        p.set_from_str(&value.to_string()).unwrap();
        prop_assert_eq!(p.get_int().unwrap(), value);
        prop_assert_eq!(p.satisfies_constraint(), (-10..=10).contains(&value));
    }

    #[test]
    fn prop_non_numeric_int_override_rejected(text in "[a-z]{1,8}") {
        let mut p = Parameter::value_int("demo.n", "n", None, 3);
        prop_assert!(p.set_from_str(&text).is_err());
        prop_assert_eq!(p.get_int().unwrap(), 3);
    }
}
