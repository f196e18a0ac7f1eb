//! Data-integrity error kinds
//!
//! Fetched catalog data is expected to satisfy a few structural invariants
//! (exactly one currently effective price per schedule, resolvable
//! relationship ids, well-typed attributes). Violations are unrecoverable
//! and abort the generation run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A price schedule had no entry with a null start date
    #[error("no currently effective price (null startDate) in schedule at {resource}")]
    NoEffectivePrice { resource: String },

    /// A price schedule had more than one entry with a null start date
    #[error("{count} entries with null startDate in schedule at {resource}, expected exactly one")]
    AmbiguousEffectivePrice { resource: String, count: usize },

    /// A relationship id was not present in the included records
    #[error("relationship {relationship} points at id {id}, which is missing from the included records")]
    DanglingRelationship { relationship: String, id: String },

    /// A record was missing a required attribute, or it had the wrong type
    #[error("missing or ill-typed field {field} on {resource}")]
    MissingField { resource: String, field: String },
}
