//! Command-line interface definitions.
//!
//! Defines the CLI structure for crmdb using `clap`. Global flags select the
//! configuration and override individual settings; subcommands address
//! tables by SQL name (`order_detail`) or type name (`OrderDetail`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::schema::Table;

/// CRM relational data store
#[derive(Parser, Debug)]
#[command(name = "crmdb")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to crmdb.toml when present
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database URL or path, overriding config and DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database: Option<String>,

    /// Log level or filter directive (e.g. debug, crmdb=trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply the choice to all colored output of this process.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Describe the schema: every table, or one table's columns and relationships
    Schema(SchemaArgs),

    /// Insert a row from a JSON object of column values
    Insert(InsertArgs),

    /// Show one row with its relationships
    Get(RowArgs),

    /// List every row of a table
    List(TableArg),

    /// Replace every column of a row from a JSON object
    Update(UpdateArgs),

    /// Delete a row
    Delete(DeleteArgs),

    /// Point a foreign key at another parent, or clear it
    Link(LinkArgs),
}

/// Table argument shared by several commands.
#[derive(Parser, Debug)]
pub struct TableArg {
    /// Table name (e.g. customer, order_detail, OrderDetail)
    pub table: Table,
}

/// Arguments for `schema`.
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Table to describe; all tables when omitted
    pub table: Option<Table>,
}

/// Arguments for `insert`.
#[derive(Parser, Debug)]
pub struct InsertArgs {
    /// Table name
    pub table: Table,

    /// Column values as a JSON object (`-` reads stdin)
    pub json: String,
}

/// Arguments addressing a single row.
#[derive(Parser, Debug)]
pub struct RowArgs {
    /// Table name
    pub table: Table,

    /// Row id
    pub id: i32,
}

/// Arguments for `update`.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Table name
    pub table: Table,

    /// Row id
    pub id: i32,

    /// Full set of column values as a JSON object (`-` reads stdin)
    pub json: String,
}

/// Arguments for `delete`.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Table name
    pub table: Table,

    /// Row id
    pub id: i32,

    /// Delete dependent rows too instead of refusing
    #[arg(long)]
    pub cascade: bool,
}

/// Arguments for `link`.
#[derive(Parser, Debug)]
pub struct LinkArgs {
    /// Child table name
    pub table: Table,

    /// Child row id
    pub id: i32,

    /// Foreign key column (e.g. customer_id)
    pub column: String,

    /// Parent row id; clears the reference when omitted
    pub parent_id: Option<i32>,
}
