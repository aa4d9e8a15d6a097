//! Handlers for the row commands.

use std::io::Read;

use crate::adapter::inbound::cli::command::{
    DeleteArgs, InsertArgs, LinkArgs, RowArgs, TableArg, UpdateArgs,
};
use crate::adapter::inbound::cli::output;
use crate::app::record;
use crate::error::Result;
use crate::port::outbound::store::Store;

/// Read a JSON argument, or stdin when it is `-`.
fn read_body(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;
    Ok(body)
}

/// Execute `insert TABLE JSON`.
pub fn insert<S: Store>(store: &S, args: &InsertArgs) -> Result<()> {
    let body = read_body(&args.json)?;
    output::document(&record::insert(store, args.table, &body)?);
    Ok(())
}

/// Execute `get TABLE ID`.
pub fn get<S: Store>(store: &S, args: &RowArgs) -> Result<()> {
    output::document(&record::get(store, args.table, args.id)?);
    Ok(())
}

/// Execute `list TABLE`.
pub fn list<S: Store>(store: &S, args: &TableArg) -> Result<()> {
    output::document(&record::list(store, args.table)?);
    Ok(())
}

/// Execute `update TABLE ID JSON`.
pub fn update<S: Store>(store: &S, args: &UpdateArgs) -> Result<()> {
    let body = read_body(&args.json)?;
    output::document(&record::update(store, args.table, args.id, &body)?);
    Ok(())
}

/// Execute `delete TABLE ID`. The delete policy is fixed by the store.
pub fn delete<S: Store>(store: &S, args: &DeleteArgs) -> Result<()> {
    output::document(&record::delete(store, args.table, args.id)?);
    Ok(())
}

/// Execute `link TABLE ID COLUMN [PARENT_ID]`.
pub fn link<S: Store>(store: &S, args: &LinkArgs) -> Result<()> {
    output::document(&record::link(
        store,
        args.table,
        args.id,
        &args.column,
        args.parent_id,
    )?);
    Ok(())
}
