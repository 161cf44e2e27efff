//! Write records: the mutable counterpart of read models.
//!
//! A `*Record` struct holds `ActiveValue` fields for the columns a caller may
//! assign. [`RecordTrait`] turns that state into parameterized INSERT and
//! UPDATE statements by walking the entity's column descriptors, so adding a
//! column to an entity definition is the whole change. Counter bumps and the
//! deletion flag go through [`update_columns`] and [`soft_delete`] instead;
//! records never carry them.
//!
//! ```no_run
//! use umbrella::entity::account::AccountRecord;
//! use umbrella::record::RecordTrait;
//! # fn demo(db: &umbrella::Database) -> Result<(), umbrella::record::RecordError> {
//! let account = AccountRecord::new("ferris", "ferris@example.com", "hunter2").insert(db)?;
//! # Ok(()) }
//! ```

pub mod error;
pub mod traits;
pub mod value;
pub mod writes;

#[doc(inline)]
pub use error::RecordError;
#[doc(inline)]
pub use traits::RecordTrait;
#[doc(inline)]
pub use value::{ActiveValue, NotSet, Set};
#[doc(inline)]
pub use writes::{soft_delete, update_columns, ColumnWrite};
