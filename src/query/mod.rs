//! Query building and execution for forum entities.
//!
//! Every read in the crate flows through [`SelectQuery`]: SQL is rendered by
//! sea-query's `PostgresQueryBuilder`, identifiers go through `Iden`
//! implementations, and values travel as bound parameters. Entities plug in
//! through [`EntityTrait`], which also owns the live-row rule: `find()`
//! filters soft-deleted rows out, `find_with_deleted()` is the explicit
//! escape hatch.
//!
//! # Examples
//!
//! ```no_run
//! use umbrella::entity::post::{Column, Post};
//! use umbrella::{ColumnTrait, EntityTrait, StoreExecutor};
//!
//! # fn demo(executor: &impl StoreExecutor) -> Result<(), umbrella::StoreError> {
//! let rustposts = Post::find()
//!     .filter(Column::Title.contains("rust"))
//!     .all(executor)?;
//! # Ok(())
//! # }
//! ```

// Core traits for entities and models
pub mod traits;
#[doc(inline)]
pub use traits::{EntityName, EntityTrait, FromRow};

// Value conversion utilities
pub(crate) mod value_conversion;
pub use value_conversion::with_converted_params;

// SELECT query builder
pub mod select;
#[doc(inline)]
pub use select::SelectQuery;

// Query execution methods
pub mod execution;

// Column operations
pub mod column;
#[doc(inline)]
pub use column::{
    ColumnDefault, ColumnDefinition, ColumnKind, ColumnTrait, ForeignKeyRef,
};
