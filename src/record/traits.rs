//! The write-side mapper.
//!
//! A record is the mutable companion of a model: every writable column is an
//! [`ActiveValue`] field, and the default methods here walk the entity's
//! column descriptors to turn that field state into `INSERT`/`UPDATE`
//! statements. Contract violations (a required column left unset, nothing to
//! write) are rejected before any SQL leaves the process.

use sea_query::{Expr, Iden, InsertStatement, PostgresQueryBuilder, UpdateStatement, Value};

use crate::executor::{StoreError, StoreExecutor};
use crate::query::column::ColumnTrait;
use crate::query::traits::{EntityName, EntityTrait, FromRow};
use crate::query::value_conversion::with_converted_params;
use crate::record::error::RecordError;
use crate::record::value::ActiveValue;

pub(crate) fn column_name<C: Iden>(column: &C) -> String {
    column.unquoted().to_string()
}

/// A write record for one entity.
///
/// Implementors expose their field state through [`RecordTrait::get`]; the
/// insert/update machinery is supplied generically on top of it.
pub trait RecordTrait: Default + Clone + Send + std::fmt::Debug {
    type Entity: EntityTrait;

    /// Field state for `column`, type-erased to [`Value`].
    fn get(&self, column: <Self::Entity as EntityTrait>::Column) -> ActiveValue<Value>;

    /// Columns this record currently assigns.
    fn assigned_columns(&self) -> Vec<<Self::Entity as EntityTrait>::Column> {
        Self::Entity::columns()
            .iter()
            .copied()
            .filter(|column| self.get(*column).is_set())
            .collect()
    }

    /// Insert this record and decode the stored row.
    ///
    /// Store-generated columns (sequences) are never listed; unset columns
    /// with a declared default or NULL fallback are left to the store. An
    /// unset column with neither fails with [`RecordError::MissingColumn`]
    /// before any SQL is sent. The statement carries `RETURNING *` so the
    /// returned model reflects every store-filled value.
    fn insert<Ex>(&self, executor: &Ex) -> Result<<Self::Entity as EntityTrait>::Model, RecordError>
    where
        Ex: StoreExecutor,
    {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for &column in Self::Entity::columns() {
            let def = column.def();
            if def.is_generated() {
                continue;
            }
            match self.get(column) {
                ActiveValue::Set(value) => {
                    columns.push(column);
                    values.push(Expr::val(value));
                }
                ActiveValue::NotSet => {
                    if def.nullable || def.has_store_default() {
                        continue;
                    }
                    return Err(RecordError::MissingColumn {
                        column: column_name(&column),
                    });
                }
            }
        }
        if columns.is_empty() {
            return Err(RecordError::EmptyWrite {
                operation: "insert",
            });
        }

        let mut stmt = InsertStatement::default();
        stmt.into_table(Self::Entity::default().table_name())
            .columns(columns)
            .returning_all();
        stmt.values_panic(values);

        let (sql, params) = stmt.build(PostgresQueryBuilder);
        let row = with_converted_params(&params, |params| executor.query_one(&sql, params))?;
        let model = <Self::Entity as EntityTrait>::Model::from_row(&row)
            .map_err(|err| StoreError::Parse(format!("Failed to decode row: {err}")))?;
        Ok(model)
    }

    /// Overwrite the row identified by `key` with this record's assignments.
    ///
    /// Only `Set` fields are written; the primary key and store-generated
    /// columns are never assignable. A record with nothing set fails with
    /// [`RecordError::EmptyWrite`] before any SQL is sent.
    fn update<Ex>(
        &self,
        executor: &Ex,
        key: i32,
    ) -> Result<<Self::Entity as EntityTrait>::Model, RecordError>
    where
        Ex: StoreExecutor,
    {
        let mut stmt = UpdateStatement::default();
        stmt.table(Self::Entity::default().table_name());

        let mut assigned = 0usize;
        for &column in Self::Entity::columns() {
            if column == Self::Entity::primary_key() || column.def().is_generated() {
                continue;
            }
            if let ActiveValue::Set(value) = self.get(column) {
                stmt.value(column, Expr::val(value));
                assigned += 1;
            }
        }
        if assigned == 0 {
            return Err(RecordError::EmptyWrite {
                operation: "update",
            });
        }

        stmt.and_where(Self::Entity::primary_key().eq(key))
            .returning_all();

        let (sql, params) = stmt.build(PostgresQueryBuilder);
        let row = with_converted_params(&params, |params| executor.query_one(&sql, params))?;
        let model = <Self::Entity as EntityTrait>::Model::from_row(&row)
            .map_err(|err| StoreError::Parse(format!("Failed to decode row: {err}")))?;
        Ok(model)
    }
}
