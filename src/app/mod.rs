//! Application layer.
//!
//! Operations addressed by table name rather than by Rust type, for callers
//! that only know the table at runtime (the CLI).

pub mod record;

pub use record::{dispatch, EntityVisitor};
