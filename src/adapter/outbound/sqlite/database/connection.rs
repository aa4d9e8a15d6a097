//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases. Every pooled connection has foreign
//! key enforcement switched on before it is handed out.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::infrastructure::config::database::DatabaseConfig;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies connection pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the configured database.
///
/// An in-memory database lives and dies with its connection, so the pool is
/// limited to a single connection in that case.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let max_size = if config.is_memory() {
        1
    } else {
        config.pool_size
    };
    debug!(url = %config.url, max_size, "creating sqlite pool");

    let manager = ConnectionManager::<SqliteConnection>::new(&config.url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}

/// Configure SQLite connection pragmas.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout: Duration,
) -> QueryResult<()> {
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    diesel::sql_query(format!("PRAGMA busy_timeout = {}", busy_timeout.as_millis())).execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    fn memory_pool() -> DbPool {
        create_pool(&DatabaseConfig::in_memory()).unwrap()
    }

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(&DatabaseConfig::in_memory());
        assert!(pool.is_ok());
    }

    #[test]
    fn memory_pool_is_single_connection() {
        let pool = memory_pool();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn file_pool_respects_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: dir.path().join("crm.sqlite").display().to_string(),
            pool_size: 3,
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.max_size(), 3);
    }

    #[test]
    fn run_migrations_creates_tables() {
        let pool = memory_pool();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();

        let result: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(
            result,
            vec![
                "customer",
                "customer_feedback",
                "department",
                "employee",
                "inventory",
                "order",
                "order_detail",
                "order_promotion",
                "product",
                "promotion",
                "shipment",
                "supplier",
            ]
        );
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let pool = memory_pool();

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='customer'",
        )
        .load::<TableName>(&mut conn)
        .unwrap();

        assert_eq!(tables.len(), 1);
    }

    #[test]
    fn pooled_connections_enforce_foreign_keys() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        let rows = diesel::sql_query("PRAGMA foreign_keys")
            .load::<ForeignKeysPragma>(&mut conn)
            .unwrap();
        assert_eq!(rows[0].foreign_keys, 1);
    }

    #[derive(diesel::QueryableByName)]
    struct ForeignKeysPragma {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        foreign_keys: i64,
    }

    #[test]
    fn pooled_connections_set_busy_timeout() {
        let config = DatabaseConfig {
            busy_timeout_ms: 1234,
            ..DatabaseConfig::in_memory()
        };
        let pool = create_pool(&config).unwrap();
        let mut conn = pool.get().unwrap();

        let rows = diesel::sql_query("PRAGMA busy_timeout")
            .load::<BusyTimeout>(&mut conn)
            .unwrap();
        assert_eq!(rows[0].timeout, 1234);
    }

    #[derive(diesel::QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        timeout: i64,
    }

    #[test]
    fn engine_rejects_orphan_rows_when_prechecks_are_bypassed() {
        let pool = memory_pool();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let result = diesel::sql_query(
            "INSERT INTO shipment (order_id, status) VALUES (999, 'pending')",
        )
        .execute(&mut conn);

        let err: Error = result.unwrap_err().into();
        assert!(err.is_constraint(), "{err}");
    }

    #[test]
    fn engine_rejects_missing_required_column() {
        let pool = memory_pool();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let result = diesel::sql_query("INSERT INTO customer (email) VALUES ('a@example.com')")
            .execute(&mut conn);

        let err: Error = result.unwrap_err().into();
        assert!(err.is_constraint(), "{err}");
    }

    #[test]
    fn migrations_constant_is_accessible() {
        let _migrations = MIGRATIONS;
    }
}
