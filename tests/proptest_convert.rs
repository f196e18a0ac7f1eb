//! Property-based tests using proptest
//!
//! The enum converters must be total: any input string, recognized or not,
//! maps to a defined output rather than failing.

use proptest::prelude::*;
use skgen::catalog::convert::{offer_payment_mode, product_type, subscription_period};

const PRODUCT_TYPES: &[&str] = &[
    "Consumable",
    "NonConsumable",
    "NonRenewingSubscription",
    "RecurringSubscription",
    "UNKNOWN",
];

const PERIODS: &[&str] = &["P1W", "P1M", "P3M", "P1Y", "P2Y", "P3Y", "UNKNOWN"];

const PAYMENT_MODES: &[&str] = &["free", "payAsYouGo", "payUpFront", "unknown"];

proptest! {
    /// Every input maps into the closed output vocabulary
    #[test]
    fn product_type_is_total(raw in "\\PC*") {
        prop_assert!(PRODUCT_TYPES.contains(&product_type(&raw)));
    }

    #[test]
    fn subscription_period_is_total(raw in "\\PC*") {
        prop_assert!(PERIODS.contains(&subscription_period(&raw)));
    }

    #[test]
    fn offer_payment_mode_is_total(raw in "\\PC*") {
        prop_assert!(PAYMENT_MODES.contains(&offer_payment_mode(&raw)));
    }

    /// Strings that are not the exact vendor tokens always hit the sentinel
    #[test]
    fn unrecognized_input_hits_the_sentinel(raw in "[a-z][a-zA-Z0-9_]{0,30}") {
        // Lowercase-first strings can never be the SCREAMING_SNAKE_CASE
        // vendor tokens
        prop_assert_eq!(product_type(&raw), "UNKNOWN");
        prop_assert_eq!(subscription_period(&raw), "UNKNOWN");
        prop_assert_eq!(offer_payment_mode(&raw), "unknown");
    }
}
