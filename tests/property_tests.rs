/// Property-based tests using proptest
/// Tests invariants of coercion, slug derivation and roster deduplication
mod common;

use common::roster_page;
use fighter_harvest::discovery::parse_roster;
use fighter_harvest::extractor::{parse_integer, parse_percentage};
use fighter_harvest::profile::profile_slug;
use proptest::prelude::*;
use std::collections::HashSet;

// Property: integer text coerces to the same integer
proptest! {
    #[test]
    fn integer_text_round_trips(n in any::<i32>()) {
        prop_assert_eq!(parse_integer("age", &n.to_string()).unwrap(), n);
    }

    #[test]
    fn integer_parsing_never_panics(text in "\\PC*") {
        let _ = parse_integer("age", &text);
    }
}

// Property: "<n>%" becomes n / 100 and stays inside [0, 1]
proptest! {
    #[test]
    fn percentage_is_fraction_of_hundred(n in 0u32..=100) {
        let value = parse_percentage("accuracy", &format!("{}%", n)).unwrap();
        prop_assert!((value - f64::from(n) / 100.0).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn percentage_above_hundred_rejected(n in 101u32..100_000) {
        let text = format!("{}%", n);
        prop_assert!(parse_percentage("accuracy", &text).is_err());
    }

    #[test]
    fn percentage_parsing_never_panics(text in "\\PC*") {
        let _ = parse_percentage("accuracy", &text);
    }
}

// Property: slugs are given-family, lowercased
proptest! {
    #[test]
    fn slug_swaps_name_halves(family in "[A-Za-z]{1,12}", given in "[A-Za-z]{1,12}") {
        let slug = profile_slug(&format!("{}, {}", family, given)).unwrap();
        prop_assert_eq!(slug, format!("{}-{}", given.to_lowercase(), family.to_lowercase()));
    }

    #[test]
    fn names_without_comma_rejected(name in "[A-Za-z ]{0,20}") {
        prop_assert!(profile_slug(&name).is_err());
    }

    #[test]
    fn slug_derivation_never_panics(name in "\\PC*") {
        let _ = profile_slug(&name);
    }
}

fn roster_column(names: &[&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(names.to_vec()), 0..8)
}

// Property: a roster yields each name once, in first-seen order
proptest! {
    #[test]
    fn roster_names_are_unique_and_first_seen(
        even in roster_column(&["Doe, John", "Smith, Jane", "Diaz, Nate"]),
        odd in roster_column(&["Doe, John", "Aldo, Jose", "Jones, Jon"]),
    ) {
        let names = parse_roster(&roster_page(&even, &odd)).unwrap();

        let mut seen = HashSet::new();
        let expected: Vec<&str> = even
            .iter()
            .chain(odd.iter())
            .copied()
            .filter(|name| seen.insert(*name))
            .collect();

        prop_assert_eq!(names, expected);
    }
}
