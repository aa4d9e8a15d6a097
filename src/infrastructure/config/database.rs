//! Database configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// What happens to child rows when their parent is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Reject the delete while any child row references the parent.
    #[default]
    Restrict,
    /// Delete dependent rows recursively; clear nullable references.
    Cascade,
}

/// SQLite connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite database URL or file path. `:memory:` for a private in-memory
    /// database.
    pub url: String,

    /// Maximum pooled connections. In-memory databases always use one.
    pub pool_size: u32,

    /// How long a writer waits on a locked database before failing.
    pub busy_timeout_ms: u64,

    /// Policy applied when deleting a referenced row.
    pub on_delete: DeletePolicy,
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: ":memory:".into(),
            ..Self::default()
        }
    }

    /// Whether the URL names an in-memory database.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url == ":memory:" || self.url.contains("mode=memory")
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "crm.sqlite".into(),
            pool_size: 5,
            busy_timeout_ms: 5000,
            on_delete: DeletePolicy::Restrict,
        }
    }
}
