//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!          ┌─────────────────────────┐
//!          │  Application (record)   │
//!          └────────────┬────────────┘
//!                       │ Store
//!                       ▼
//!          ┌─────────────────────────┐
//!          │  SQLite adapter (Diesel)│
//!          └─────────────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::store::EntityStore`] - Typed CRUD for one entity
//! - [`outbound::store::RelationshipStore`] - Catalog-driven referential operations
//! - [`outbound::store::Store`] - Everything above for all twelve entities

pub mod outbound;
