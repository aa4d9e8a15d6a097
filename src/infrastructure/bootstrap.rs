//! Composition root: builds the store a command runs against.

use tracing::debug;

use crate::adapter::outbound::sqlite::store::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::database::DatabaseConfig;

/// Open the configured database, applying pending migrations.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_store(config: &DatabaseConfig) -> Result<SqliteStore> {
    let store = SqliteStore::open(config)?;
    debug!(
        url = %config.url,
        pool_size = store.pool().max_size(),
        on_delete = ?store.delete_policy(),
        "store opened"
    );
    Ok(store)
}
