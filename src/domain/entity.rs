//! Traits shared by every entity record and its draft.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ConstraintError;
use super::id::Id;
use super::schema::Table;

/// A stored row of one table.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Input shape for inserts and full-replacement updates.
    type Draft: Draft + DeserializeOwned + Default + Clone + fmt::Debug;

    /// Table this entity is stored in.
    const TABLE: Table;

    fn id(&self) -> Id<Self>;

    /// Current value of each foreign key column.
    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        Vec::new()
    }
}

/// Unvalidated column values for an entity.
///
/// Every column is optional so that an omitted required column is reported
/// as a NOT NULL violation instead of a decoding failure.
pub trait Draft {
    /// Table the draft is written to.
    const TABLE: Table;

    /// Check NOT NULL constraints.
    ///
    /// # Errors
    /// Returns the first required column that is unset.
    fn validate(&self) -> Result<(), ConstraintError>;

    /// Foreign key values currently held by the draft.
    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        Vec::new()
    }

    /// Point the foreign key `column` at `id`.
    ///
    /// # Errors
    /// Returns [`ConstraintError::UnknownReference`] when `column` is not a
    /// foreign key of the table.
    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        let _ = id;
        Err(unknown_reference(Self::TABLE, column))
    }
}

pub(crate) fn unknown_reference(table: Table, column: &str) -> ConstraintError {
    ConstraintError::UnknownReference {
        table,
        column: column.to_string(),
    }
}
