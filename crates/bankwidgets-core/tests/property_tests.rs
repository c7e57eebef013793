//! Property-based tests for deposit validation, currency conversion and
//! occurrence selection.

use bankwidgets_core::{
    cents_to_numeric_dollars, deposits_valid, dollars_to_cents, is_valid_deposit,
    select_occurrences, TransferOccurrence, PREVIEW_LIMIT,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Decimal strings with at most two places (`"0"`, `"12.5"`, `"3.07"`)
fn two_place_amount() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{1,7}(\\.[0-9]{1,2})?").expect("valid regex")
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
}

/// (is_active, run offset hours, process offset hours) relative to base
fn occurrence_strategy() -> impl Strategy<Value = (bool, i64, i64)> {
    (any::<bool>(), -500i64..500, -500i64..500)
}

fn build(spec: &(bool, i64, i64)) -> TransferOccurrence {
    TransferOccurrence {
        id: 0,
        run_time_utc: base() + Duration::hours(spec.1),
        transfer_name: String::new(),
        transfer_description: String::new(),
        is_active: spec.0,
        amount_cents: 100,
        from_account_name: String::new(),
        to_account_name: String::new(),
        process_date: base() + Duration::hours(spec.2),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Converting to cents and back preserves the numeric value
    #[test]
    fn cents_roundtrip(amount in two_place_amount()) {
        let cents = dollars_to_cents(&amount).unwrap();
        let back = cents_to_numeric_dollars(cents);
        prop_assert_eq!(dollars_to_cents(&back).unwrap(), cents);
        prop_assert_eq!(back.split_once('.').unwrap().1.len(), 2);
    }

    /// Well-formed amounts are valid exactly when they are positive
    #[test]
    fn valid_iff_positive(amount in two_place_amount()) {
        let positive = dollars_to_cents(&amount).unwrap() > 0;
        prop_assert_eq!(is_valid_deposit(&amount), positive);
    }

    /// Anything with a character outside the pattern is rejected
    #[test]
    fn foreign_characters_rejected(prefix in "[0-9]{0,3}", junk in "[^0-9.]", suffix in "[0-9]{0,3}") {
        let input = format!("{}{}{}", prefix, junk, suffix);
        prop_assert!(!is_valid_deposit(&input));
    }

    /// The pair is valid only when each field is
    #[test]
    fn pair_requires_both(a in two_place_amount(), b in two_place_amount()) {
        prop_assert_eq!(deposits_valid(&a, &b), is_valid_deposit(&a) && is_valid_deposit(&b));
        prop_assert!(!deposits_valid(&a, ""));
        prop_assert!(!deposits_valid("", &b));
    }

    /// Selection is ordered, bounded, active, future, and drawn from the input
    #[test]
    fn selection_invariants(specs in prop::collection::vec(occurrence_strategy(), 0..30)) {
        let now = base();
        let raw: Vec<_> = specs.iter().map(build).collect();
        let eligible = specs.iter().filter(|s| s.0 && s.1 > 0).count();

        let selected = select_occurrences(raw, now, PREVIEW_LIMIT);

        prop_assert_eq!(selected.len(), eligible.min(PREVIEW_LIMIT));
        prop_assert!(selected.windows(2).all(|w| w[0].process_date <= w[1].process_date));
        prop_assert!(selected.iter().all(|o| o.is_active && o.run_time_utc > now));
        prop_assert!(selected.iter().all(|o| o.id >= 1 && o.id <= eligible));
    }
}
