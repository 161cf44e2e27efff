//! Targeted column writes that bypass the record structs.
//!
//! [`update_columns`] assigns an explicit list of columns on one row, with
//! two non-literal directives for sequence-backed counters. [`soft_delete`]
//! is the only mutation path for the deletion flag; records never carry it.

use sea_query::{Expr, ExprTrait, PostgresQueryBuilder, UpdateStatement, Value};

use crate::executor::StoreExecutor;
use crate::query::column::ColumnTrait;
use crate::query::traits::EntityTrait;
use crate::query::value_conversion::with_converted_params;
use crate::record::error::RecordError;
use crate::record::traits::column_name;

/// One column assignment in a targeted update.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWrite {
    /// Bind this literal as a statement parameter.
    Value(Value),
    /// Re-apply the column's declared default (`SET col = DEFAULT`).
    Default,
    /// Advance the stored value by one (`SET col = col + 1`).
    Increment,
}

/// Assign `writes` on the row of `E` identified by `key`.
///
/// Literal writes may not target the primary key or store-generated columns;
/// `Default` and `Increment` require a declared default or sequence. Either
/// violation, or an empty write list, fails before any SQL is sent. Returns
/// the number of rows the store reports as updated.
pub fn update_columns<E, Ex>(
    executor: &Ex,
    key: i32,
    writes: &[(E::Column, ColumnWrite)],
) -> Result<u64, RecordError>
where
    E: EntityTrait,
    Ex: StoreExecutor,
{
    if writes.is_empty() {
        return Err(RecordError::EmptyWrite {
            operation: "targeted update",
        });
    }

    let mut stmt = UpdateStatement::default();
    stmt.table(E::default().table_name());

    for (column, write) in writes {
        let column = *column;
        let def = column.def();
        match write {
            ColumnWrite::Value(value) => {
                if column == E::primary_key() || def.is_generated() {
                    return Err(RecordError::NotAssignable {
                        column: column_name(&column),
                    });
                }
                stmt.value(column, Expr::val(value.clone()));
            }
            ColumnWrite::Default => {
                if !def.has_store_default() {
                    return Err(RecordError::NoDefault {
                        column: column_name(&column),
                    });
                }
                stmt.value(column, Expr::cust("DEFAULT"));
            }
            ColumnWrite::Increment => {
                if !def.has_store_default() {
                    return Err(RecordError::NoDefault {
                        column: column_name(&column),
                    });
                }
                stmt.value(column, Expr::col(column).add(1));
            }
        }
    }

    stmt.and_where(E::primary_key().eq(key));

    let (sql, params) = stmt.build(PostgresQueryBuilder);
    let affected = with_converted_params(&params, |params| executor.execute(&sql, params))?;
    Ok(affected)
}

/// Mark the row of `E` identified by `key` as deleted.
///
/// The row stays in the store; reads through `find()` stop seeing it.
/// Returns the number of rows the store reports as updated, so a caller can
/// distinguish a missing row (0) from a completed delete (1).
pub fn soft_delete<E, Ex>(executor: &Ex, key: i32) -> Result<u64, RecordError>
where
    E: EntityTrait,
    Ex: StoreExecutor,
{
    let mut stmt = UpdateStatement::default();
    stmt.table(E::default().table_name())
        .value(E::deleted_flag(), Expr::val(true))
        .and_where(E::primary_key().eq(key));

    let (sql, params) = stmt.build(PostgresQueryBuilder);
    let affected = with_converted_params(&params, |params| executor.execute(&sql, params))?;
    Ok(affected)
}
