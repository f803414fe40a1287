//! Repository Module
//!
//! Typed access to the backend tables. Each repository turns table rows into
//! domain types for a specific entity; no business rules live here.

pub mod offer;
pub mod profile;
pub mod want;

// Re-export for convenience
pub use offer as offer_repository;
pub use profile as profile_repository;
pub use want as want_repository;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::{BackendError, Table};

/// Decode a single row
fn decode<T: DeserializeOwned>(row: Value) -> Result<T, BackendError> {
    serde_json::from_value(row).map_err(BackendError::from)
}

/// Decode every row
fn decode_all<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, BackendError> {
    rows.into_iter().map(decode).collect()
}

/// The row a single-row insert or update returned
fn first_row<T: DeserializeOwned>(rows: Vec<Value>, table: Table) -> Result<T, BackendError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Decode(format!("write to {} returned no rows", table)))?;
    decode(row)
}
