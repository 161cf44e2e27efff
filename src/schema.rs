//! Schema bootstrap: render and execute DDL from the entity descriptors.
//!
//! The same `ColumnDefinition` metadata that drives the record mapper is the
//! single source for table creation, so the schema cannot drift from what
//! the mapper believes about a column.

use sea_query::{ForeignKey, PostgresQueryBuilder, Table, TableCreateStatement};

use crate::executor::{StoreError, StoreExecutor};
use crate::query::column::ColumnTrait;
use crate::query::traits::EntityTrait;

/// Render `CREATE TABLE IF NOT EXISTS` for an entity.
///
/// An entity declaring no columns is a contract violation and fails before
/// any SQL is rendered.
pub fn create_table_statement<E: EntityTrait>() -> Result<TableCreateStatement, StoreError> {
    let columns = E::columns();
    if columns.is_empty() {
        return Err(StoreError::Query(format!(
            "entity '{}' declares no columns",
            E::default().table_name()
        )));
    }

    let mut table = Table::create();
    table.table(E::default().table_name()).if_not_exists();

    for &column in columns {
        let def = column.def();
        let mut column_def = def.to_column_def(column);
        if column == E::primary_key() {
            column_def.primary_key();
        }
        table.col(&mut column_def);

        if let Some(fk) = def.references {
            table.foreign_key(
                ForeignKey::create()
                    .from(E::default().table_name(), column)
                    .to(fk.table, fk.column),
            );
        }
    }

    Ok(table)
}

/// Create the entity's table if it does not exist yet.
pub fn create_table<E, Ex>(executor: &Ex) -> Result<(), StoreError>
where
    E: EntityTrait,
    Ex: StoreExecutor,
{
    let statement = create_table_statement::<E>()?;
    let sql = statement.build(PostgresQueryBuilder);
    executor.execute(&sql, &[])?;
    log::debug!("Ensured table '{}'", E::default().table_name());
    Ok(())
}

/// Create every forum table, referenced tables first.
pub fn create_all_tables<Ex: StoreExecutor>(executor: &Ex) -> Result<(), StoreError> {
    create_table::<crate::entity::Account, _>(executor)?;
    create_table::<crate::entity::Category, _>(executor)?;
    create_table::<crate::entity::Post, _>(executor)?;
    create_table::<crate::entity::Comment, _>(executor)?;
    log::info!("Schema bootstrap complete (4 tables ensured)");
    Ok(())
}

/// True when a table of this name exists in the public schema.
pub fn table_exists<Ex: StoreExecutor>(executor: &Ex, name: &str) -> Result<bool, StoreError> {
    let rows = executor.query_all(
        "SELECT tablename FROM pg_tables WHERE schemaname = 'public' AND tablename = $1",
        &[&name],
    )?;
    Ok(!rows.is_empty())
}
