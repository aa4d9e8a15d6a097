//! Record operations over any table, with JSON in and JSON out.
//!
//! Rendered records follow the JSON:API resource shape: the entity's columns
//! (minus `id`) under `attributes`, parent references under their role name
//! and child collections under their collection name in `relationships`.

use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::entity::unknown_reference;
use crate::domain::schema::{ForeignKey, Table};
use crate::domain::{
    Customer, CustomerFeedback, Department, Employee, Entity, Id, Inventory, Order, OrderDetail,
    OrderPromotion, Product, Promotion, Shipment, Supplier,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EntityStore, RelationshipStore, Store};

/// An operation generic over the entity type, selected at runtime by table.
pub trait EntityVisitor<S> {
    type Output;

    fn visit<E: Entity>(self, store: &S) -> Self::Output
    where
        S: EntityStore<E>;
}

/// Run `visitor` against the entity type stored in `table`.
pub fn dispatch<S, V>(table: Table, store: &S, visitor: V) -> V::Output
where
    S: Store,
    V: EntityVisitor<S>,
{
    match table {
        Table::Customer => visitor.visit::<Customer>(store),
        Table::Employee => visitor.visit::<Employee>(store),
        Table::Product => visitor.visit::<Product>(store),
        Table::Promotion => visitor.visit::<Promotion>(store),
        Table::Supplier => visitor.visit::<Supplier>(store),
        Table::CustomerFeedback => visitor.visit::<CustomerFeedback>(store),
        Table::Department => visitor.visit::<Department>(store),
        Table::Inventory => visitor.visit::<Inventory>(store),
        Table::Order => visitor.visit::<Order>(store),
        Table::OrderDetail => visitor.visit::<OrderDetail>(store),
        Table::OrderPromotion => visitor.visit::<OrderPromotion>(store),
        Table::Shipment => visitor.visit::<Shipment>(store),
    }
}

/// Insert a row from a JSON object of column values.
///
/// # Errors
/// Returns [`Error::Json`] for malformed input, or a constraint error.
pub fn insert<S: Store>(store: &S, table: Table, body: &str) -> Result<Value> {
    dispatch(table, store, Insert { body })
}

/// Render one row.
///
/// # Errors
/// Returns [`Error::NotFound`] if the row does not exist.
pub fn get<S: Store>(store: &S, table: Table, id: i32) -> Result<Value> {
    dispatch(table, store, Get { id })
}

/// Render every row of a table, ordered by id.
pub fn list<S: Store>(store: &S, table: Table) -> Result<Value> {
    dispatch(table, store, List)
}

/// Replace every column of a row from a JSON object.
///
/// # Errors
/// Returns [`Error::NotFound`] if the row does not exist, [`Error::Json`] for
/// malformed input, or a constraint error.
pub fn update<S: Store>(store: &S, table: Table, id: i32, body: &str) -> Result<Value> {
    dispatch(table, store, Update { id, body })
}

/// Delete a row under the store's delete policy.
///
/// # Errors
/// Returns [`Error::NotFound`] if the row does not exist, or
/// [`ConstraintError::Referenced`](crate::domain::ConstraintError::Referenced)
/// when children still reference it under the restrict policy.
pub fn delete<S: Store>(store: &S, table: Table, id: i32) -> Result<Value> {
    if !store.delete_row(table, id)? {
        return Err(Error::NotFound { table, id });
    }
    info!(%table, id, "record deleted");
    Ok(json!({
        "meta": { "deleted": identifier(table, id) },
    }))
}

/// Point a row's foreign key `column` at `parent`, or clear it with `None`.
///
/// # Errors
/// Returns [`Error::NotFound`] if the row does not exist, or a constraint
/// error if `column` is not a foreign key, is required and `parent` is
/// `None`, or `parent` does not exist.
pub fn link<S: Store>(
    store: &S,
    table: Table,
    id: i32,
    column: &str,
    parent: Option<i32>,
) -> Result<Value> {
    let fk = ForeignKey::find(table, column).ok_or_else(|| unknown_reference(table, column))?;
    if !store.set_parent(fk, id, parent)? {
        return Err(Error::NotFound { table, id });
    }
    info!(%table, id, column = fk.column, ?parent, "record linked");
    get(store, table, id)
}

/// Render an entity as a JSON:API resource object.
///
/// # Errors
/// Returns an error if a child collection cannot be read.
pub fn resource<S, E>(store: &S, entity: &E) -> Result<Value>
where
    S: RelationshipStore,
    E: Entity,
{
    let table = E::TABLE;
    let id = entity.id().get();

    let mut attributes = match serde_json::to_value(entity)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    attributes.remove("id");

    let mut relationships = Map::new();
    for (column, value) in entity.references() {
        let Some(fk) = ForeignKey::find(table, column) else {
            continue;
        };
        let data = value.map_or(Value::Null, |parent| identifier(fk.parent, parent));
        relationships.insert(fk.parent_role.to_string(), json!({ "data": data }));
    }
    for fk in table.referenced_by() {
        let children: Vec<Value> = store
            .child_ids(fk, id)?
            .into_iter()
            .map(|child| identifier(fk.table, child))
            .collect();
        relationships.insert(fk.collection.to_string(), json!({ "data": children }));
    }

    Ok(json!({
        "type": table.collection(),
        "id": id,
        "attributes": attributes,
        "relationships": relationships,
    }))
}

fn identifier(table: Table, id: i32) -> Value {
    json!({ "type": table.collection(), "id": id })
}

fn document<S, E>(store: &S, entity: &E) -> Result<Value>
where
    S: RelationshipStore,
    E: Entity,
{
    Ok(json!({ "data": resource(store, entity)? }))
}

struct Insert<'a> {
    body: &'a str,
}

impl<S: RelationshipStore> EntityVisitor<S> for Insert<'_> {
    type Output = Result<Value>;

    fn visit<E: Entity>(self, store: &S) -> Result<Value>
    where
        S: EntityStore<E>,
    {
        let draft: E::Draft = serde_json::from_str(self.body)?;
        let entity = store.insert(&draft)?;
        info!(table = %E::TABLE, id = entity.id().get(), "record inserted");
        document(store, &entity)
    }
}

struct Get {
    id: i32,
}

impl<S: RelationshipStore> EntityVisitor<S> for Get {
    type Output = Result<Value>;

    fn visit<E: Entity>(self, store: &S) -> Result<Value>
    where
        S: EntityStore<E>,
    {
        let entity = store.get(Id::new(self.id))?.ok_or(Error::NotFound {
            table: E::TABLE,
            id: self.id,
        })?;
        document(store, &entity)
    }
}

struct List;

impl<S: RelationshipStore> EntityVisitor<S> for List {
    type Output = Result<Value>;

    fn visit<E: Entity>(self, store: &S) -> Result<Value>
    where
        S: EntityStore<E>,
    {
        let rows = store
            .list()?
            .iter()
            .map(|entity: &E| resource(store, entity))
            .collect::<Result<Vec<_>>>()?;
        Ok(json!({ "data": rows }))
    }
}

struct Update<'a> {
    id: i32,
    body: &'a str,
}

impl<S: RelationshipStore> EntityVisitor<S> for Update<'_> {
    type Output = Result<Value>;

    fn visit<E: Entity>(self, store: &S) -> Result<Value>
    where
        S: EntityStore<E>,
    {
        let draft: E::Draft = serde_json::from_str(self.body)?;
        let entity = store.update(Id::new(self.id), &draft)?.ok_or(Error::NotFound {
            table: E::TABLE,
            id: self.id,
        })?;
        info!(table = %E::TABLE, id = self.id, "record updated");
        document(store, &entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::store::SqliteStore;
    use crate::domain::ConstraintError;
    use crate::infrastructure::config::database::DatabaseConfig;

    fn store() -> SqliteStore {
        SqliteStore::open(&DatabaseConfig::in_memory()).unwrap()
    }

    #[test]
    fn insert_renders_document_with_empty_collections() {
        let store = store();
        let doc = insert(&store, Table::Customer, r#"{"name": "Ada", "email": "ada@example.com"}"#)
            .unwrap();

        assert_eq!(doc["data"]["type"], "Customer");
        assert_eq!(doc["data"]["id"], 1);
        assert_eq!(doc["data"]["attributes"]["name"], "Ada");
        assert!(doc["data"]["attributes"].get("id").is_none());
        assert_eq!(doc["data"]["relationships"]["OrderList"]["data"], json!([]));
        assert_eq!(
            doc["data"]["relationships"]["CustomerFeedbackList"]["data"],
            json!([])
        );
    }

    #[test]
    fn child_shows_up_in_parent_collection() {
        let store = store();
        insert(&store, Table::Customer, r#"{"name": "Ada"}"#).unwrap();
        let order = insert(&store, Table::Order, r#"{"customer_id": 1, "total_amount": 12.5}"#)
            .unwrap();

        assert_eq!(
            order["data"]["relationships"]["customer"]["data"],
            json!({ "type": "Customer", "id": 1 })
        );

        let customer = get(&store, Table::Customer, 1).unwrap();
        assert_eq!(
            customer["data"]["relationships"]["OrderList"]["data"],
            json!([{ "type": "Order", "id": 1 }])
        );
    }

    #[test]
    fn department_without_manager_renders_null_role() {
        let store = store();
        let doc = insert(&store, Table::Department, r#"{"name": "Research"}"#).unwrap();
        assert_eq!(doc["data"]["relationships"]["manager"]["data"], Value::Null);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let store = store();
        let err = insert(&store, Table::Customer, r#"{"name": "Ada", "nickname": "A"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn get_missing_row_is_not_found() {
        let store = store();
        let err = get(&store, Table::Shipment, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                table: Table::Shipment,
                id: 3
            }
        ));
    }

    #[test]
    fn update_replaces_all_columns() {
        let store = store();
        insert(
            &store,
            Table::Customer,
            r#"{"name": "Ada", "email": "ada@example.com"}"#,
        )
        .unwrap();

        let doc = update(&store, Table::Customer, 1, r#"{"name": "Ada Lovelace"}"#).unwrap();
        assert_eq!(doc["data"]["attributes"]["name"], "Ada Lovelace");
        assert_eq!(doc["data"]["attributes"]["email"], Value::Null);
    }

    #[test]
    fn list_orders_rows_by_id() {
        let store = store();
        insert(&store, Table::Employee, r#"{"name": "Grace"}"#).unwrap();
        insert(&store, Table::Employee, r#"{"name": "Alan"}"#).unwrap();

        let doc = list(&store, Table::Employee).unwrap();
        let ids: Vec<i64> = doc["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn link_moves_child_between_parents() {
        let store = store();
        insert(&store, Table::Customer, r#"{"name": "Ada"}"#).unwrap();
        insert(&store, Table::Customer, r#"{"name": "Grace"}"#).unwrap();
        insert(&store, Table::Order, r#"{"customer_id": 1}"#).unwrap();

        link(&store, Table::Order, 1, "customer_id", Some(2)).unwrap();

        let first = get(&store, Table::Customer, 1).unwrap();
        let second = get(&store, Table::Customer, 2).unwrap();
        assert_eq!(first["data"]["relationships"]["OrderList"]["data"], json!([]));
        assert_eq!(
            second["data"]["relationships"]["OrderList"]["data"],
            json!([{ "type": "Order", "id": 1 }])
        );
    }

    #[test]
    fn link_cannot_clear_required_reference() {
        let store = store();
        insert(&store, Table::Customer, r#"{"name": "Ada"}"#).unwrap();
        insert(&store, Table::Order, r#"{"customer_id": 1}"#).unwrap();

        let err = link(&store, Table::Order, 1, "customer_id", None).unwrap_err();
        assert!(matches!(
            err,
            Error::Constraint(ConstraintError::NotNull {
                table: Table::Order,
                column: "customer_id"
            })
        ));
    }

    #[test]
    fn link_rejects_scalar_column() {
        let store = store();
        insert(&store, Table::Customer, r#"{"name": "Ada"}"#).unwrap();
        let err = link(&store, Table::Customer, 1, "email", Some(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::Constraint(ConstraintError::UnknownReference { .. })
        ));
    }

    #[test]
    fn delete_reports_missing_row() {
        let store = store();
        let err = delete(&store, Table::Product, 1).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
