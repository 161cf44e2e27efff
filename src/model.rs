//! Model trait for column-keyed access to stored rows.

use crate::query::EntityTrait;
use sea_query::Value;

/// Trait for Model-level operations.
///
/// Lets generic code (the record mapper, uniqueness pre-checks) read any
/// column of a fetched row without knowing the concrete model type.
///
/// # Example
///
/// ```no_run
/// use umbrella::entity::account::{Account, AccountModel, Column};
/// use umbrella::ModelTrait;
///
/// # fn show(model: &AccountModel) {
/// let username = model.get(Column::Username);
/// let pk = model.primary_key_value();
/// # }
/// ```
pub trait ModelTrait: Clone + Send + std::fmt::Debug {
    /// The Entity type this Model belongs to
    type Entity: EntityTrait;

    /// Get the value of a column from the model.
    fn get(&self, column: <Self::Entity as EntityTrait>::Column) -> Value;

    /// Get the primary key value from the model.
    fn primary_key_value(&self) -> Value;
}
