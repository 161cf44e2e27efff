//! Core traits wiring entities to the query builder.

use crate::executor::{StoreError, StoreExecutor};
use crate::model::ModelTrait;
use crate::query::column::ColumnTrait;
use crate::query::select::SelectQuery;
use may_postgres::Row;
use sea_query::{Order, Value};

/// Names an entity's backing table.
pub trait EntityName: Default {
    /// The table this entity is stored in.
    fn table_name(&self) -> &'static str;
}

/// The entity contract: ties together a table, its column set, and the model
/// type rows decode into.
///
/// The static `columns()` slice is the schema descriptor the record mapper
/// and the DDL generator walk; a column that is not listed there cannot
/// appear in any generated statement.
///
/// # Examples
///
/// ```no_run
/// use umbrella::entity::account::Account;
/// use umbrella::{EntityTrait, StoreExecutor};
///
/// # fn demo(executor: &impl StoreExecutor) -> Result<(), umbrella::StoreError> {
/// let live = Account::find().all(executor)?;
/// let everyone = Account::find_with_deleted().all(executor)?;
/// # Ok(())
/// # }
/// ```
pub trait EntityTrait: EntityName + Copy + Clone + Sized + 'static {
    /// The row type reads decode into.
    type Model: ModelTrait<Entity = Self> + FromRow;
    /// The column enum for this table.
    type Column: ColumnTrait + std::fmt::Debug + PartialEq;

    /// Every column of the table, in declaration order.
    fn columns() -> &'static [Self::Column];

    /// The primary key column.
    fn primary_key() -> Self::Column;

    /// The soft-delete flag column.
    fn deleted_flag() -> Self::Column;

    /// Select live rows: the soft-delete predicate is applied for you.
    fn find() -> SelectQuery<Self> {
        SelectQuery::new().filter(Self::deleted_flag().eq(false))
    }

    /// Select rows without the live predicate, soft-deleted ones included.
    fn find_with_deleted() -> SelectQuery<Self> {
        SelectQuery::new()
    }

    /// Select the live row with the given primary key.
    fn find_by_id(id: i32) -> SelectQuery<Self> {
        Self::find().filter(Self::primary_key().eq(id))
    }

    /// Every live row, ordered by primary key.
    fn read_all<Ex>(executor: &Ex, limit: Option<u64>) -> Result<Vec<Self::Model>, StoreError>
    where
        Ex: StoreExecutor,
    {
        let mut query = Self::find().order_by(Self::primary_key(), Order::Asc);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(executor)
    }

    /// Live rows where `column` equals `value`, ordered by primary key.
    fn read_by<Ex, V>(
        executor: &Ex,
        column: Self::Column,
        value: V,
        limit: Option<u64>,
    ) -> Result<Vec<Self::Model>, StoreError>
    where
        Ex: StoreExecutor,
        V: Into<Value>,
    {
        let mut query = Self::find()
            .filter(column.eq(value))
            .order_by(Self::primary_key(), Order::Asc);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(executor)
    }

    /// Live rows where `column` contains `needle`, ordered by primary key.
    ///
    /// The substring counterpart of [`read_by`](Self::read_by): wildcards in
    /// the needle match themselves, so this never degenerates into an
    /// equality path and an equality lookup never gains wildcards.
    fn read_containing<Ex>(
        executor: &Ex,
        column: Self::Column,
        needle: &str,
        limit: Option<u64>,
    ) -> Result<Vec<Self::Model>, StoreError>
    where
        Ex: StoreExecutor,
    {
        let mut query = Self::find()
            .filter(column.contains(needle))
            .order_by(Self::primary_key(), Order::Asc);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(executor)
    }
}

/// Decode a database row into a typed value.
pub trait FromRow: Sized {
    /// Build `Self` from a row, failing on missing or mistyped columns.
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error>;
}
