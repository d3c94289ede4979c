//! Row parsing helpers shared by the repos.

use crate::error::DatabaseError;

/// Parse a TEXT column into a `snake_case` serde enum (`MetricKind`,
/// `CulturalCategory`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Empty strings read back as `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a `COUNT(*)` style INTEGER column as `usize`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for negative values.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<usize, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    usize::try_from(n).map_err(|_| DatabaseError::Query(format!("Negative count {n}")))
}

/// Read an INTEGER year column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value does not fit in `i32`.
pub fn get_year(row: &libsql::Row, idx: i32) -> Result<i32, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    i32::try_from(n).map_err(|_| DatabaseError::Query(format!("Year {n} out of range")))
}
