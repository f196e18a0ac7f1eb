//! Vendor enum conversion
//!
//! The App Store Connect API reports enums as SCREAMING_SNAKE_CASE strings;
//! the StoreKit configuration format uses its own vocabulary. Each converter
//! is total: unrecognized input maps to a sentinel instead of failing, so a
//! new value on the API side never breaks generation.

/// Convert an in-app purchase type to the StoreKit product type
pub fn product_type(raw: &str) -> &'static str {
    match raw {
        "CONSUMABLE" => "Consumable",
        "NON_CONSUMABLE" => "NonConsumable",
        "NON_RENEWING_SUBSCRIPTION" => "NonRenewingSubscription",
        "RECURRING_SUBSCRIPTION" => "RecurringSubscription",
        _ => "UNKNOWN",
    }
}

/// Convert a subscription period to its ISO-8601-style duration token
pub fn subscription_period(raw: &str) -> &'static str {
    match raw {
        "ONE_WEEK" => "P1W",
        "ONE_MONTH" => "P1M",
        "THREE_MONTHS" => "P3M",
        "ONE_YEAR" => "P1Y",
        "TWO_YEARS" => "P2Y",
        "THREE_YEARS" => "P3Y",
        _ => "UNKNOWN",
    }
}

/// Convert an introductory offer mode to the StoreKit payment mode
pub fn offer_payment_mode(raw: &str) -> &'static str {
    match raw {
        "FREE_TRIAL" => "free",
        "PAY_AS_YOU_GO" => "payAsYouGo",
        "PAY_UP_FRONT" => "payUpFront",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_mapping() {
        assert_eq!(product_type("CONSUMABLE"), "Consumable");
        assert_eq!(product_type("NON_CONSUMABLE"), "NonConsumable");
        assert_eq!(product_type("NON_RENEWING_SUBSCRIPTION"), "NonRenewingSubscription");
        assert_eq!(product_type("RECURRING_SUBSCRIPTION"), "RecurringSubscription");
        assert_eq!(product_type("SOMETHING_NEW"), "UNKNOWN");
    }

    #[test]
    fn test_subscription_period_mapping() {
        assert_eq!(subscription_period("ONE_WEEK"), "P1W");
        assert_eq!(subscription_period("ONE_MONTH"), "P1M");
        assert_eq!(subscription_period("THREE_MONTHS"), "P3M");
        assert_eq!(subscription_period("ONE_YEAR"), "P1Y");
        assert_eq!(subscription_period("TWO_YEARS"), "P2Y");
        assert_eq!(subscription_period("THREE_YEARS"), "P3Y");
        assert_eq!(subscription_period(""), "UNKNOWN");
    }

    #[test]
    fn test_offer_payment_mode_mapping() {
        assert_eq!(offer_payment_mode("FREE_TRIAL"), "free");
        assert_eq!(offer_payment_mode("PAY_AS_YOU_GO"), "payAsYouGo");
        assert_eq!(offer_payment_mode("PAY_UP_FRONT"), "payUpFront");
        assert_eq!(offer_payment_mode("LOYALTY_BONUS"), "unknown");
    }
}
