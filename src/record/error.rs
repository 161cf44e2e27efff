//! Errors raised while mapping records to SQL writes.

use std::error::Error;
use std::fmt;

use crate::executor::StoreError;

/// Errors from the record mapper.
///
/// The contract variants (`MissingColumn`, `NotAssignable`, `NoDefault`,
/// `EmptyWrite`) are raised before any SQL is sent; `Store` wraps failures
/// from the executor underneath.
#[derive(Debug)]
pub enum RecordError {
    /// A required column with no store default was left unset at insert.
    MissingColumn { column: String },
    /// A literal value was aimed at a store-generated column.
    NotAssignable { column: String },
    /// A default/increment directive targeted a column with no store default.
    NoDefault { column: String },
    /// The write resolved to an empty column set.
    EmptyWrite { operation: &'static str },
    /// The store rejected the statement.
    Store(StoreError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingColumn { column } => {
                write!(f, "Column '{column}' requires a value and has no default")
            }
            RecordError::NotAssignable { column } => {
                write!(f, "Column '{column}' is store-generated and cannot be assigned")
            }
            RecordError::NoDefault { column } => {
                write!(f, "Column '{column}' has no declared default to apply")
            }
            RecordError::EmptyWrite { operation } => {
                write!(f, "Nothing to write for {operation}")
            }
            RecordError::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecordError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        RecordError::Store(err)
    }
}
