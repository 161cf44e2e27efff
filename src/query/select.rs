//! Select query builder.
//!
//! `SelectQuery` carries a sea-query `SelectStatement` plus the entity type
//! it selects from. Builder methods live here; execution methods are in the
//! execution module.

use crate::query::traits::EntityTrait;
use sea_query::{IntoColumnRef, Order, SelectStatement};
use std::marker::PhantomData;

/// Query builder for selecting rows of one entity.
///
/// Obtained from `EntityTrait::find()` / `find_with_deleted()` and chained
/// with filters, ordering, and limits.
///
/// # Example
///
/// ```no_run
/// use umbrella::entity::post::{Column, Post};
/// use umbrella::{ColumnTrait, EntityTrait, StoreExecutor};
/// use sea_query::Order;
///
/// # fn demo(executor: &impl StoreExecutor) -> Result<(), umbrella::StoreError> {
/// let recent = Post::find()
///     .filter(Column::AuthorId.eq(7))
///     .order_by(Column::Id, Order::Desc)
///     .limit(10)
///     .all(executor)?;
/// # Ok(())
/// # }
/// ```
pub struct SelectQuery<E>
where
    E: EntityTrait,
{
    pub(crate) query: SelectStatement,
    pub(crate) _phantom: PhantomData<E>,
}

impl<E> SelectQuery<E>
where
    E: EntityTrait,
{
    /// Create a bare `SELECT * FROM table` for this entity.
    ///
    /// No live-row predicate is applied here; `EntityTrait::find()` owns
    /// that rule.
    pub fn new() -> Self {
        let mut query = SelectStatement::default();
        query
            .column(sea_query::Asterisk)
            .from(E::default().table_name());
        Self {
            query,
            _phantom: PhantomData,
        }
    }

    /// Add a filter condition.
    ///
    /// Accepts anything implementing `IntoCondition`: a single expression
    /// from `ColumnTrait` builders, or a composite `sea_query::Condition`.
    /// Repeated calls AND together.
    pub fn filter<F>(mut self, condition: F) -> Self
    where
        F: sea_query::IntoCondition,
    {
        self.query.cond_where(condition.into_condition());
        self
    }

    /// Append an ORDER BY clause. Repeated calls order by multiple columns.
    pub fn order_by<C>(mut self, column: C, order: Order) -> Self
    where
        C: IntoColumnRef,
    {
        self.query.order_by(column, order);
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: u64) -> Self {
        self.query.limit(limit);
        self
    }

    /// Skip the first `offset` rows.
    pub fn offset(mut self, offset: u64) -> Self {
        self.query.offset(offset);
        self
    }
}

impl<E> Clone for SelectQuery<E>
where
    E: EntityTrait,
{
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<E> Default for SelectQuery<E>
where
    E: EntityTrait,
{
    fn default() -> Self {
        Self::new()
    }
}
