//! crmdb - relational data model for a small CRM.
//!
//! Twelve entities (customers, employees, products, promotions, suppliers,
//! feedback, departments, inventory, orders, order lines, applied promotions
//! and shipments) persisted in SQLite with their parent/child relationships
//! enforced.
//!
//! # Architecture
//!
//! - **`domain`** - Entity records, drafts, typed ids and the static schema
//!   catalog that drives referential checks and relationship rendering
//! - **`port`** - Store traits the application depends on
//! - **`adapter::outbound::sqlite`** - Diesel implementation of the stores
//! - **`app`** - Table-name driven record operations rendering JSON documents
//! - **`adapter::inbound::cli`** - The `crmdb` command line
//! - **`infrastructure`** - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use crmdb::adapter::outbound::sqlite::store::SqliteStore;
//! use crmdb::domain::{Customer, NewCustomer, NewOrder, Order};
//! use crmdb::infrastructure::config::database::DatabaseConfig;
//! use crmdb::port::outbound::store::EntityStore;
//!
//! fn main() -> crmdb::error::Result<()> {
//!     let store = SqliteStore::open(&DatabaseConfig::in_memory())?;
//!     let customer: Customer = store.insert(&NewCustomer::named("Ada"))?;
//!     let order: Order = store.insert(&NewOrder::for_customer(customer.id))?;
//!     assert_eq!(store.customer_orders(customer.id)?, vec![order]);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
