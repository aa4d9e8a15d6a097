use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::domain::error::ConstraintError;
use crate::domain::schema::Table;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error("{table} id {id} not found")]
    NotFound { table: Table, id: i32 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

impl Error {
    /// Whether this is a recoverable constraint violation.
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => Error::Constraint(ConstraintError::Rejected {
                message: info.message().to_string(),
            }),
            other => Error::Database(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_are_recoverable() {
        let err: Error = ConstraintError::NotNull {
            table: Table::Customer,
            column: "name",
        }
        .into();
        assert!(err.is_constraint());
        assert_eq!(err.to_string(), "NOT NULL constraint failed: customer.name");
    }

    #[test]
    fn not_found_is_not_a_constraint() {
        let err = Error::NotFound {
            table: Table::Order,
            id: 9,
        };
        assert!(!err.is_constraint());
        assert_eq!(err.to_string(), "order id 9 not found");
    }

    #[test]
    fn missing_row_maps_to_database_error() {
        let err: Error = diesel::result::Error::NotFound.into();
        assert!(matches!(err, Error::Database(_)));
    }
}
