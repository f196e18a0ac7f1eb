//! Catalog fetchers
//!
//! This module reads the product/subscription catalog for one app out of the
//! App Store Connect API and projects it into the output document types.
//!
//! # Module Structure
//!
//! - [`convert`] - Vendor enum string to StoreKit vocabulary converters
//! - [`error`] - Data-integrity error kinds
//! - [`pricing`] - Shared current-price resolution over price schedules
//! - [`products`] - In-app purchase assembly
//! - [`subscriptions`] - Subscription group and subscription assembly

pub mod convert;
pub mod error;
pub mod pricing;
pub mod products;
pub mod subscriptions;

use error::CatalogError;
use serde_json::Value;

/// Storefront used for all locale-specific pricing reads
pub(crate) const TERRITORY: &str = "USA";

/// Get a record's id
pub(crate) fn record_id(record: &Value, resource: &str) -> Result<String, CatalogError> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| CatalogError::MissingField {
            resource: resource.to_string(),
            field: "id".to_string(),
        })
}

fn attr<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    record.get("attributes").and_then(|attrs| attrs.get(field))
}

/// Get a required string attribute
pub(crate) fn attr_str(record: &Value, resource: &str, field: &str) -> Result<String, CatalogError> {
    attr(record, field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| CatalogError::MissingField {
            resource: resource.to_string(),
            field: field.to_string(),
        })
}

/// Get an optional string attribute (absent or null becomes `None`)
pub(crate) fn attr_opt_str(record: &Value, field: &str) -> Option<String> {
    attr(record, field).and_then(Value::as_str).map(String::from)
}

/// Get a required boolean attribute
pub(crate) fn attr_bool(record: &Value, resource: &str, field: &str) -> Result<bool, CatalogError> {
    attr(record, field)
        .and_then(Value::as_bool)
        .ok_or_else(|| CatalogError::MissingField {
            resource: resource.to_string(),
            field: field.to_string(),
        })
}

/// Get a required integer attribute
pub(crate) fn attr_i64(record: &Value, resource: &str, field: &str) -> Result<i64, CatalogError> {
    attr(record, field)
        .and_then(Value::as_i64)
        .ok_or_else(|| CatalogError::MissingField {
            resource: resource.to_string(),
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attr_helpers() {
        let record = json!({
            "id": "sub1",
            "attributes": {
                "name": "Monthly",
                "familySharable": true,
                "groupLevel": 2,
                "description": null
            }
        });

        assert_eq!(record_id(&record, "subscription").unwrap(), "sub1");
        assert_eq!(attr_str(&record, "subscription", "name").unwrap(), "Monthly");
        assert!(attr_bool(&record, "subscription", "familySharable").unwrap());
        assert_eq!(attr_i64(&record, "subscription", "groupLevel").unwrap(), 2);
        assert_eq!(attr_opt_str(&record, "description"), None);
        assert_eq!(attr_opt_str(&record, "name").as_deref(), Some("Monthly"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let record = json!({ "id": "sub1", "attributes": {} });

        let err = attr_str(&record, "subscription", "name").unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { .. }));
        assert!(err.to_string().contains("name"));
    }
}
