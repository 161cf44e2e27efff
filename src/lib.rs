//! # Umbrella
//!
//! Coroutine-native PostgreSQL data-access core for a small multi-user
//! forum, built on the `may` runtime.
//!
//! The layers, bottom up:
//!
//! - [`config`] / [`connection`] / [`executor`]: connection settings, dialing,
//!   and the [`StoreExecutor`] seam every statement passes through.
//! - [`query`]: type-safe SELECT building over entity column enums.
//! - [`record`]: the write-side mapper, driven by per-column metadata.
//! - [`entity`]: the forum's tables (accounts, categories, posts, comments).
//! - [`pagination`] / [`schema`]: in-memory page slicing and DDL bootstrap.
//! - [`forum`]: the service facade the application talks to.
//!
//! ```no_run
//! use umbrella::{Database, Forum};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let forum = Forum::new(Database::from_env()?);
//! let page = forum.browse_posts(20, 0)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod entity;
pub mod executor;
pub mod forum;
pub mod model;
pub mod pagination;
pub mod query;
pub mod record;
pub mod schema;
#[cfg(feature = "tracing")]
pub mod tracing_helpers;

#[cfg(test)]
pub(crate) mod tests_cfg;

pub use config::DatabaseConfig;
pub use connection::{connect, ConnectionError};
pub use executor::{run_blocking, Database, MayPostgresExecutor, StoreError, StoreExecutor};
pub use forum::{
    Forum, ForumError, NewAccount, NewPost, PostWithComments, UpdatePost, UpdateProfile,
};
pub use model::ModelTrait;
pub use pagination::{paginate, Page, PageError};
pub use query::{
    ColumnDefinition, ColumnTrait, EntityName, EntityTrait, FromRow, SelectQuery,
};
pub use record::{ActiveValue, ColumnWrite, NotSet, RecordError, RecordTrait, Set};
