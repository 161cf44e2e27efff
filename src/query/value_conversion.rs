//! Value conversion from sea-query to may_postgres.
//!
//! Bound values leave sea-query as `Value` enums and must reach the driver
//! as `ToSql` trait objects. Each value converts to one owned, typed
//! parameter; NULLs stay typed (`Option<String>`, `Option<bool>`, ...) so the
//! driver's `to_sql_checked` sees the wire type the column expects. The
//! converted parameters live until the closure returns, which is where the
//! statement actually runs.

use crate::executor::StoreError;
use chrono::NaiveDateTime;
use may_postgres::types::ToSql;
use sea_query::{Value, ValueType};

fn as_timestamp(value: &Value) -> Option<NaiveDateTime> {
    // Matching the chrono variants by shape would couple this module to the
    // boxing layout of sea-query's `Value`; `ValueType::try_from` extracts
    // independently of it.
    <NaiveDateTime as ValueType>::try_from(value.clone()).ok()
}

/// Convert one sea-query value into an owned `ToSql` parameter.
///
/// `Option` carries the nullability through to the driver: a NULL string is
/// an `Option::<String>::None`, never a null of some other type.
fn to_param(value: &Value) -> Result<Box<dyn ToSql>, StoreError> {
    Ok(match value {
        Value::Bool(v) => Box::new(*v),
        Value::Int(v) => Box::new(*v),
        Value::BigInt(v) => Box::new(*v),
        Value::TinyInt(v) => Box::new(v.map(i32::from)),
        Value::SmallInt(v) => Box::new(v.map(i32::from)),
        Value::TinyUnsigned(v) => Box::new(v.map(i32::from)),
        Value::SmallUnsigned(v) => Box::new(v.map(i32::from)),
        Value::Unsigned(v) => Box::new(v.map(i64::from)),
        Value::BigUnsigned(v) => {
            let narrowed = match v {
                Some(u) if *u > i64::MAX as u64 => {
                    return Err(StoreError::Other(format!(
                        "BigUnsigned value {u} exceeds i64::MAX, cannot bind it"
                    )));
                }
                Some(u) => Some(*u as i64),
                None => None,
            };
            Box::new(narrowed)
        }
        Value::Float(v) => Box::new(*v),
        Value::Double(v) => Box::new(*v),
        Value::String(v) => Box::new(v.clone()),
        Value::Bytes(v) => Box::new(v.clone()),
        Value::Json(Some(j)) => Box::new(Some(serde_json::to_string(&**j).map_err(
            |e| StoreError::Other(format!("Failed to serialize JSON: {e}")),
        )?)),
        Value::Json(None) => Box::new(Option::<String>::None),
        other => match as_timestamp(other) {
            Some(ts) => Box::new(ts),
            None if matches!(other, Value::ChronoDateTime(None)) => {
                Box::new(Option::<NaiveDateTime>::None)
            }
            None => {
                return Err(StoreError::Other(format!(
                    "Unsupported value type in query: {other:?}"
                )));
            }
        },
    })
}

/// Convert sea-query values to may_postgres `ToSql` parameters and run `f`
/// with them.
///
/// # Errors
///
/// Returns `StoreError::Other` for value types with no parameter mapping
/// (nothing in this crate produces one).
pub fn with_converted_params<F, R>(values: &sea_query::Values, f: F) -> Result<R, StoreError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, StoreError>,
{
    let owned: Vec<Box<dyn ToSql>> = values
        .iter()
        .map(to_param)
        .collect::<Result<_, StoreError>>()?;
    let params: Vec<&dyn ToSql> = owned.iter().map(AsRef::as_ref).collect();

    f(&params)
}
