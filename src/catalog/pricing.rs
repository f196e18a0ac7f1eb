//! Current-price resolution
//!
//! In-app purchase and subscription pricing share the same shape: a price
//! schedule holds entries with validity start dates, the entry whose start
//! date is null is the presently effective one, and its relationship points
//! at a side-loaded price point carrying the customer-facing price. This
//! module resolves that pattern once, parametrized over the schedule path
//! and the relationship name.

use super::error::CatalogError;
use super::TERRITORY;
use crate::asc::client::AscClient;
use anyhow::Result;
use serde_json::Value;

/// Resolve the currently effective price point of a price schedule
///
/// Reads all schedule entries at `path` filtered to the fixed territory,
/// side-loading the `relationship` resource, and returns the price point
/// record of the single entry with a null `startDate`. Zero or multiple
/// such entries, and unresolvable relationship ids, are data-integrity
/// faults that abort the run.
pub async fn resolve_current_price_point(
    client: &AscClient,
    path: &str,
    relationship: &str,
) -> Result<Value> {
    let list = client
        .read_all(path, &[("include", relationship), ("filter[territory]", TERRITORY)])
        .await?;

    let entry = select_current_entry(&list.data, path)?;

    let pointer = format!("/relationships/{}/data/id", relationship);
    let point_id = entry
        .pointer(&pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::MissingField {
            resource: path.to_string(),
            field: format!("relationships.{}.data.id", relationship),
        })?;

    let point = list
        .included
        .get(point_id)
        .ok_or_else(|| CatalogError::DanglingRelationship {
            relationship: relationship.to_string(),
            id: point_id.to_string(),
        })?;

    Ok(point.clone())
}

/// Select the exactly-one schedule entry whose `startDate` attribute is null
fn select_current_entry<'a>(entries: &'a [Value], resource: &str) -> Result<&'a Value, CatalogError> {
    let mut current = entries.iter().filter(|entry| {
        entry
            .get("attributes")
            .and_then(|attrs| attrs.get("startDate"))
            .is_some_and(Value::is_null)
    });

    let Some(entry) = current.next() else {
        return Err(CatalogError::NoEffectivePrice {
            resource: resource.to_string(),
        });
    };

    let extra = current.count();
    if extra > 0 {
        return Err(CatalogError::AmbiguousEffectivePrice {
            resource: resource.to_string(),
            count: extra + 1,
        });
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, start_date: Value) -> Value {
        json!({
            "id": id,
            "attributes": { "startDate": start_date },
            "relationships": { "pricePoint": { "data": { "id": format!("pp-{}", id) } } }
        })
    }

    #[test]
    fn test_selects_the_null_start_date_entry() {
        let entries = vec![
            entry("a", json!("2024-01-01")),
            entry("b", json!(null)),
            entry("c", json!("2025-06-01")),
        ];

        let selected = select_current_entry(&entries, "prices").unwrap();
        assert_eq!(selected["id"], "b");
    }

    #[test]
    fn test_zero_null_entries_is_a_fault() {
        let entries = vec![entry("a", json!("2024-01-01"))];

        let err = select_current_entry(&entries, "prices").unwrap_err();
        assert!(matches!(err, CatalogError::NoEffectivePrice { .. }));
    }

    #[test]
    fn test_empty_schedule_is_a_fault() {
        let err = select_current_entry(&[], "prices").unwrap_err();
        assert!(matches!(err, CatalogError::NoEffectivePrice { .. }));
    }

    #[test]
    fn test_multiple_null_entries_is_a_fault() {
        let entries = vec![entry("a", json!(null)), entry("b", json!(null))];

        let err = select_current_entry(&entries, "prices").unwrap_err();
        assert!(matches!(err, CatalogError::AmbiguousEffectivePrice { count: 2, .. }));
    }

    #[test]
    fn test_absent_start_date_does_not_count_as_null() {
        // Only an explicit null marks the effective entry
        let entries = vec![json!({ "id": "a", "attributes": {} })];

        let err = select_current_entry(&entries, "prices").unwrap_err();
        assert!(matches!(err, CatalogError::NoEffectivePrice { .. }));
    }
}
