//! SQLite persistence adapter.
//!
//! Implements the store ports on top of Diesel: table definitions, row
//! models, the connection pool with its migrations, and [`store::SqliteStore`].

pub mod database;
pub mod store;
