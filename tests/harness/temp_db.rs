use std::path::{Path, PathBuf};

use crmdb::adapter::outbound::sqlite::store::SqliteStore;
use crmdb::infrastructure::config::database::{DatabaseConfig, DeletePolicy};
use tempfile::TempDir;

/// Temporary SQLite database file for integration tests.
///
/// The directory (and the database in it) is removed when dropped.
pub struct TempDb {
    dir: TempDir,
    config: DatabaseConfig,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        Self::with_policy(name, DeletePolicy::Restrict)
    }

    pub fn with_policy(name: &str, on_delete: DeletePolicy) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("crmdb-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let config = DatabaseConfig {
            url: dir.path().join("crm.sqlite").display().to_string(),
            on_delete,
            ..DatabaseConfig::default()
        };
        Self { dir, config }
    }

    /// Open a store on the database, migrating it on first use.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.config).expect("open sqlite store")
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.config.url)
    }
}
