//! Constraint violations raised by the data model.
//!
//! These are the only failures the schema itself can produce. They are
//! recoverable: the caller fixes the input and retries.
//!
//! # Examples
//!
//! ```
//! use crmdb::domain::customer::NewCustomer;
//! use crmdb::domain::Draft;
//! use crmdb::domain::error::ConstraintError;
//! use crmdb::domain::schema::Table;
//!
//! let draft = NewCustomer::default();
//! let err = draft.validate().unwrap_err();
//! assert_eq!(
//!     err,
//!     ConstraintError::NotNull { table: Table::Customer, column: "name" }
//! );
//! ```

use thiserror::Error;

use super::schema::Table;

/// A violated NOT NULL or FOREIGN KEY constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// A required column was left unset.
    #[error("NOT NULL constraint failed: {table}.{column}")]
    NotNull {
        table: Table,
        column: &'static str,
    },

    /// A foreign key names a parent row that does not exist.
    #[error("FOREIGN KEY constraint failed: {table}.{column} references missing {parent} id {id}")]
    MissingParent {
        table: Table,
        column: &'static str,
        parent: Table,
        id: i32,
    },

    /// A row cannot be deleted while children still reference it.
    #[error("cannot delete {table} id {id}: referenced by {count} {dependent} row(s) through {dependent}.{column}")]
    Referenced {
        table: Table,
        id: i32,
        dependent: Table,
        column: &'static str,
        count: i64,
    },

    /// The column is not a foreign key of the table.
    #[error("{table}.{column} is not a foreign key")]
    UnknownReference { table: Table, column: String },

    /// The database engine rejected the write.
    #[error("constraint rejected by database: {message}")]
    Rejected { message: String },
}

/// Unwrap a required draft field or report it as a NOT NULL violation.
pub fn required<T>(value: Option<T>, table: Table, column: &'static str) -> Result<T, ConstraintError> {
    value.ok_or(ConstraintError::NotNull { table, column })
}
