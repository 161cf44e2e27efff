//! Query execution methods for `SelectQuery`.
//!
//! Builds the final SQL with `PostgresQueryBuilder`, converts bound values
//! through `with_converted_params`, and decodes rows with `FromRow`.

use crate::executor::{StoreError, StoreExecutor};
use crate::query::select::SelectQuery;
use crate::query::traits::{EntityTrait, FromRow};
use crate::query::value_conversion::with_converted_params;
use sea_query::PostgresQueryBuilder;

impl<E> SelectQuery<E>
where
    E: EntityTrait,
{
    /// Execute the query and return all matching rows.
    pub fn all<Ex: StoreExecutor>(self, executor: &Ex) -> Result<Vec<E::Model>, StoreError> {
        let (sql, values) = self.query.build(PostgresQueryBuilder);

        with_converted_params(&values, |params| {
            let rows = executor.query_all(&sql, params)?;

            let mut results = Vec::with_capacity(rows.len());
            for row in rows {
                let model = <E::Model as FromRow>::from_row(&row)
                    .map_err(|e| StoreError::Parse(format!("Failed to decode row: {e}")))?;
                results.push(model);
            }
            Ok(results)
        })
    }

    /// Execute the query and return exactly one row.
    ///
    /// Zero matches is [`StoreError::NotFound`]; several matches is a
    /// [`StoreError::Query`] contract breach. The row count is inspected
    /// before any row is decoded.
    pub fn one<Ex: StoreExecutor>(self, executor: &Ex) -> Result<E::Model, StoreError> {
        let (sql, values) = self.query.build(PostgresQueryBuilder);

        with_converted_params(&values, |params| {
            let row = executor.query_one(&sql, params)?;
            <E::Model as FromRow>::from_row(&row)
                .map_err(|e| StoreError::Parse(format!("Failed to decode row: {e}")))
        })
    }

    /// Execute the query and return the single match, or `None` when there
    /// is none.
    pub fn optional<Ex: StoreExecutor>(
        self,
        executor: &Ex,
    ) -> Result<Option<E::Model>, StoreError> {
        match self.one(executor) {
            Ok(model) => Ok(Some(model)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Count the rows this query would return.
    ///
    /// The query is wrapped in `SELECT COUNT(*) FROM (...)`, so a `limit`
    /// on the query caps the count as it caps the rows.
    pub fn count<Ex: StoreExecutor>(&self, executor: &Ex) -> Result<u64, StoreError> {
        let mut outer = sea_query::SelectStatement::default();
        outer
            .expr(sea_query::Expr::cust("COUNT(*)"))
            .from_subquery(self.query.clone(), sea_query::Alias::new("count_subquery"));
        let (sql, values) = outer.build(PostgresQueryBuilder);

        with_converted_params(&values, |params| {
            let row = executor.query_one(&sql, params)?;
            let count: i64 = row
                .try_get(0)
                .map_err(|e| StoreError::Parse(format!("Failed to decode count: {e}")))?;
            u64::try_from(count)
                .map_err(|_| StoreError::Query(format!("negative count: {count}")))
        })
    }

    /// True when the query matches at least one row.
    pub fn exists<Ex: StoreExecutor>(self, executor: &Ex) -> Result<bool, StoreError> {
        Ok(self.limit(1).optional(executor)?.is_some())
    }
}
