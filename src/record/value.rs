//! Field state for write records.
//!
//! Every writable field on a record is an [`ActiveValue`]: either an
//! assignment the next `insert`/`update` must carry, or `NotSet`, in which
//! case the mapper leaves the column alone and the store's declared default
//! (if any) applies.

use sea_query::Value;

pub use ActiveValue::{NotSet, Set};

/// A record field that is either assigned or untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveValue<T> {
    /// The field carries a value to write.
    Set(T),
    /// The field is untouched; the store decides (default or NULL).
    NotSet,
}

impl<T> ActiveValue<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Set(_))
    }

    pub fn is_not_set(&self) -> bool {
        matches!(self, NotSet)
    }

    /// The assigned value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Set(value) => Some(value),
            NotSet => None,
        }
    }

    /// Borrow the assigned value, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Set(value) => Some(value),
            NotSet => None,
        }
    }
}

impl<T> ActiveValue<T>
where
    T: Into<Value> + Clone,
{
    /// Erase the field type so the mapper can treat all columns uniformly.
    pub fn to_value(&self) -> ActiveValue<Value> {
        match self {
            Set(value) => Set(value.clone().into()),
            NotSet => NotSet,
        }
    }
}

impl<T> Default for ActiveValue<T> {
    fn default() -> Self {
        NotSet
    }
}

impl<T> From<T> for ActiveValue<T> {
    fn from(value: T) -> Self {
        Set(value)
    }
}
