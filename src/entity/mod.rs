//! The forum's entities.
//!
//! One module per table. Each defines the entity marker type, its `Column`
//! enum with full schema metadata, the read-side `*Model`, and the
//! write-side `*Record`. Column enums are not re-exported here; refer to
//! them through their module (`post::Column`) to keep call sites unambiguous.

pub mod account;
pub mod category;
pub mod comment;
pub mod post;

pub use account::{Account, AccountModel, AccountRecord};
pub use category::{Category, CategoryModel, CategoryRecord};
pub use comment::{Comment, CommentModel, CommentRecord};
pub use post::{Post, PostModel, PostRecord};
