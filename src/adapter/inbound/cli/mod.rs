//! CLI module graph.

pub mod command;
pub mod output;
pub mod record;
pub mod run;
pub mod schema;
