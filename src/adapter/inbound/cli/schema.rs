//! Schema catalog listing.

use tabled::{Table as TextTable, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::schema::Table;
use crate::error::Result;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Table")]
    name: &'static str,
    #[tabled(rename = "Type")]
    collection: &'static str,
    #[tabled(rename = "Columns")]
    columns: usize,
    #[tabled(rename = "Description")]
    description: &'static str,
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: &'static str,
    #[tabled(rename = "Type")]
    sql_type: String,
    #[tabled(rename = "Null")]
    nullable: &'static str,
    #[tabled(rename = "Key")]
    key: String,
}

#[derive(Tabled)]
struct RelationshipRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Target")]
    target: &'static str,
    #[tabled(rename = "Via")]
    via: String,
}

/// Execute `schema [TABLE]`.
pub fn execute(table: Option<Table>) -> Result<()> {
    match table {
        Some(table) => describe(table),
        None => overview(),
    }
    Ok(())
}

fn overview() {
    output::section("Tables");
    let rows: Vec<TableRow> = Table::ALL
        .iter()
        .map(|table| TableRow {
            name: table.name(),
            collection: table.collection(),
            columns: table.columns().len(),
            description: table.description(),
        })
        .collect();
    output::lines(&TextTable::new(rows).to_string());
    output::hint(&format!(
        "run {} for columns and relationships",
        output::highlight("crmdb schema <table>")
    ));
}

fn describe(table: Table) {
    output::section(&format!("{} ({})", table.collection(), table.name()));
    output::field("Description", output::muted(table.description()));

    let columns: Vec<ColumnRow> = table
        .columns()
        .iter()
        .map(|column| ColumnRow {
            name: column.name,
            sql_type: column.sql_type.to_string(),
            nullable: if column.nullable { "yes" } else { "no" },
            key: if column.primary_key {
                "PK".to_string()
            } else if let Some(fk) = table.foreign_keys().find(|fk| fk.column == column.name) {
                format!("FK {}.id", fk.parent)
            } else {
                String::new()
            },
        })
        .collect();
    output::section("Columns");
    output::lines(&TextTable::new(columns).to_string());

    let mut relationships: Vec<RelationshipRow> = table
        .foreign_keys()
        .map(|fk| RelationshipRow {
            name: fk.parent_role,
            kind: if fk.nullable { "parent (optional)" } else { "parent" },
            target: fk.parent.collection(),
            via: fk.column.to_string(),
        })
        .collect();
    relationships.extend(table.referenced_by().map(|fk| RelationshipRow {
        name: fk.collection,
        kind: "children",
        target: fk.table.collection(),
        via: format!("{}.{}", fk.table, fk.column),
    }));

    if relationships.is_empty() {
        return;
    }
    output::section("Relationships");
    output::lines(&TextTable::new(relationships).to_string());
}
