//! SQLite store implementation.
//!
//! Typed CRUD for every entity plus the referential rules the schema
//! implies: required references must be set, referenced parents must exist,
//! and a parent with children is either protected (restrict) or removed
//! together with its dependents (cascade). All checks for one write run in
//! the same immediate transaction as the write itself. The engine's own
//! foreign key enforcement stays on underneath as a backstop.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sql_types::{BigInt, Integer, Nullable};
use diesel::SqliteConnection;
use tracing::{debug, warn};

use super::database::connection::{create_pool, run_migrations, DbPool};
use super::database::model::{
    CustomerFeedbackRow, CustomerRow, DepartmentRow, EmployeeRow, InventoryRow, NewCustomerFeedbackRow,
    NewCustomerRow, NewDepartmentRow, NewEmployeeRow, NewInventoryRow, NewOrderDetailRow,
    NewOrderPromotionRow, NewOrderRow, NewProductRow, NewPromotionRow, NewShipmentRow,
    NewSupplierRow, OrderDetailRow, OrderPromotionRow, OrderRow, ProductRow, PromotionRow,
    ShipmentRow, SupplierRow,
};
use super::database::schema::{
    customer, customer_feedback, department, employee, inventory, order_detail, order_promotion,
    orders, product, promotion, shipment, supplier,
};
use crate::domain::entity::unknown_reference;
use crate::domain::error::ConstraintError;
use crate::domain::schema::{ForeignKey, Table};
use crate::domain::{
    Customer, CustomerFeedback, Department, Draft, Employee, Entity, Id, Inventory, Order,
    OrderDetail, OrderPromotion, Product, Promotion, Shipment, Supplier,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::database::{DatabaseConfig, DeletePolicy};
use crate::port::outbound::store::{EntityStore, RelationshipStore};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed store for the whole data model.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
    /// Policy applied when a deleted row still has children.
    on_delete: DeletePolicy,
}

impl SqliteStore {
    /// Create a store over an existing, already migrated pool.
    #[must_use]
    pub fn new(pool: DbPool, on_delete: DeletePolicy) -> Self {
        Self { pool, on_delete }
    }

    /// Open the configured database and apply pending migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_pool(config)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool, config.on_delete))
    }

    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.on_delete
    }

    fn conn(&self) -> Result<Conn> {
        Ok(self.pool.get()?)
    }

    /// Run `f` inside an immediate transaction.
    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        let mut conn = self.conn()?;
        conn.immediate_transaction(f)
    }

    /// Insert a child with its foreign key `fk` pointed at `parent_id`.
    ///
    /// # Errors
    /// Returns [`ConstraintError::UnknownReference`] if `fk` is not held by
    /// `E`'s table, and any error from the insert.
    pub fn attach<E>(&self, fk: &ForeignKey, parent_id: i32, draft: &E::Draft) -> Result<E>
    where
        E: Entity,
        Self: EntityStore<E>,
    {
        if fk.table != E::TABLE {
            return Err(unknown_reference(E::TABLE, fk.column).into());
        }
        let mut draft = draft.clone();
        draft.set_reference(fk.column, Some(parent_id))?;
        EntityStore::<E>::insert(self, &draft)
    }

    /// Feedback left by a customer.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn customer_feedback(&self, id: Id<Customer>) -> Result<Vec<CustomerFeedback>> {
        let mut conn = self.conn()?;
        let rows = customer_feedback::table
            .filter(customer_feedback::customer_id.eq(id.get()))
            .order(customer_feedback::id.asc())
            .select(CustomerFeedbackRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Orders placed by a customer.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn customer_orders(&self, id: Id<Customer>) -> Result<Vec<Order>> {
        let mut conn = self.conn()?;
        let rows = orders::table
            .filter(orders::customer_id.eq(id.get()))
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Departments an employee manages.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn managed_departments(&self, id: Id<Employee>) -> Result<Vec<Department>> {
        let mut conn = self.conn()?;
        let rows = department::table
            .filter(department::manager_id.eq(id.get()))
            .order(department::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Stock levels of a product across suppliers.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn product_inventory(&self, id: Id<Product>) -> Result<Vec<Inventory>> {
        let mut conn = self.conn()?;
        let rows = inventory::table
            .filter(inventory::product_id.eq(id.get()))
            .order(inventory::id.asc())
            .select(InventoryRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Order lines that sell a product.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn product_order_details(&self, id: Id<Product>) -> Result<Vec<OrderDetail>> {
        let mut conn = self.conn()?;
        let rows = order_detail::table
            .filter(order_detail::product_id.eq(id.get()))
            .order(order_detail::id.asc())
            .select(OrderDetailRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Stock levels held by a supplier.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn supplier_inventory(&self, id: Id<Supplier>) -> Result<Vec<Inventory>> {
        let mut conn = self.conn()?;
        let rows = inventory::table
            .filter(inventory::supplier_id.eq(id.get()))
            .order(inventory::id.asc())
            .select(InventoryRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Orders a promotion was applied to.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn promotion_order_promotions(&self, id: Id<Promotion>) -> Result<Vec<OrderPromotion>> {
        let mut conn = self.conn()?;
        let rows = order_promotion::table
            .filter(order_promotion::promotion_id.eq(id.get()))
            .order(order_promotion::id.asc())
            .select(OrderPromotionRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Lines of an order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn order_details(&self, id: Id<Order>) -> Result<Vec<OrderDetail>> {
        let mut conn = self.conn()?;
        let rows = order_detail::table
            .filter(order_detail::order_id.eq(id.get()))
            .order(order_detail::id.asc())
            .select(OrderDetailRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Promotions applied to an order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn order_promotions(&self, id: Id<Order>) -> Result<Vec<OrderPromotion>> {
        let mut conn = self.conn()?;
        let rows = order_promotion::table
            .filter(order_promotion::order_id.eq(id.get()))
            .order(order_promotion::id.asc())
            .select(OrderPromotionRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Shipments of an order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn order_shipments(&self, id: Id<Order>) -> Result<Vec<Shipment>> {
        let mut conn = self.conn()?;
        let rows = shipment::table
            .filter(shipment::order_id.eq(id.get()))
            .order(shipment::id.asc())
            .select(ShipmentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// Catalog-driven SQL helpers
// -----------------------------------------------------------------------------

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct RowKey {
    #[diesel(sql_type = Integer)]
    id: i32,
}

#[derive(QueryableByName)]
struct ParentKey {
    #[diesel(sql_type = Nullable<Integer>)]
    parent: Option<i32>,
}

fn last_insert_id(conn: &mut SqliteConnection) -> Result<i32> {
    let id: i64 = diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?;
    i32::try_from(id).map_err(|_| Error::Database(format!("row id {id} exceeds INTEGER range")))
}

fn row_exists(conn: &mut SqliteConnection, table: Table, id: i32) -> QueryResult<bool> {
    let rows: Vec<RowCount> = diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE id = ?",
        table.quoted()
    ))
    .bind::<Integer, _>(id)
    .load(conn)?;
    Ok(rows.first().is_some_and(|row| row.count > 0))
}

fn child_keys(conn: &mut SqliteConnection, fk: &ForeignKey, parent_id: i32) -> QueryResult<Vec<i32>> {
    let rows: Vec<RowKey> = diesel::sql_query(format!(
        "SELECT id FROM {} WHERE {} = ? ORDER BY id",
        fk.table.quoted(),
        fk.column
    ))
    .bind::<Integer, _>(parent_id)
    .load(conn)?;
    Ok(rows.into_iter().map(|row| row.id).collect())
}

fn count_children(conn: &mut SqliteConnection, fk: &ForeignKey, parent_id: i32) -> QueryResult<i64> {
    let rows: Vec<RowCount> = diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {} = ?",
        fk.table.quoted(),
        fk.column
    ))
    .bind::<Integer, _>(parent_id)
    .load(conn)?;
    Ok(rows.first().map_or(0, |row| row.count))
}

/// Check every foreign key value a row is about to hold.
fn check_references(
    conn: &mut SqliteConnection,
    table: Table,
    references: &[(&'static str, Option<i32>)],
) -> Result<()> {
    for (column, value) in references {
        let fk = ForeignKey::find(table, column).ok_or_else(|| unknown_reference(table, column))?;
        match *value {
            None if fk.nullable => {}
            None => {
                return Err(ConstraintError::NotNull {
                    table,
                    column: fk.column,
                }
                .into())
            }
            Some(id) => {
                if !row_exists(conn, fk.parent, id)? {
                    warn!(%table, column = fk.column, parent = %fk.parent, id, "reference to missing parent rejected");
                    return Err(ConstraintError::MissingParent {
                        table,
                        column: fk.column,
                        parent: fk.parent,
                        id,
                    }
                    .into());
                }
            }
        }
    }
    Ok(())
}

/// Delete a row, applying `policy` to the rows that reference it.
fn delete_with_policy(
    conn: &mut SqliteConnection,
    table: Table,
    id: i32,
    policy: DeletePolicy,
) -> Result<bool> {
    if !row_exists(conn, table, id)? {
        return Ok(false);
    }

    for fk in table.referenced_by() {
        match policy {
            DeletePolicy::Restrict => {
                let count = count_children(conn, fk, id)?;
                if count > 0 {
                    warn!(%table, id, dependent = %fk.table, count, "delete of referenced row rejected");
                    return Err(ConstraintError::Referenced {
                        table,
                        id,
                        dependent: fk.table,
                        column: fk.column,
                        count,
                    }
                    .into());
                }
            }
            DeletePolicy::Cascade if fk.nullable => {
                let cleared = diesel::sql_query(format!(
                    "UPDATE {} SET {} = NULL WHERE {} = ?",
                    fk.table.quoted(),
                    fk.column,
                    fk.column
                ))
                .bind::<Integer, _>(id)
                .execute(conn)?;
                if cleared > 0 {
                    debug!(dependent = %fk.table, column = fk.column, cleared, "references cleared");
                }
            }
            DeletePolicy::Cascade => {
                for child in child_keys(conn, fk, id)? {
                    delete_with_policy(conn, fk.table, child, policy)?;
                }
            }
        }
    }

    diesel::sql_query(format!("DELETE FROM {} WHERE id = ?", table.quoted()))
        .bind::<Integer, _>(id)
        .execute(conn)?;
    debug!(%table, id, "row deleted");
    Ok(true)
}

impl RelationshipStore for SqliteStore {
    fn exists(&self, table: Table, id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        Ok(row_exists(&mut conn, table, id)?)
    }

    fn child_ids(&self, fk: &ForeignKey, parent_id: i32) -> Result<Vec<i32>> {
        let mut conn = self.conn()?;
        Ok(child_keys(&mut conn, fk, parent_id)?)
    }

    fn parent_id(&self, fk: &ForeignKey, child_id: i32) -> Result<Option<i32>> {
        let mut conn = self.conn()?;
        let rows: Vec<ParentKey> = diesel::sql_query(format!(
            "SELECT {} AS parent FROM {} WHERE id = ?",
            fk.column,
            fk.table.quoted()
        ))
        .bind::<Integer, _>(child_id)
        .load(&mut conn)?;
        Ok(rows.first().and_then(|row| row.parent))
    }

    fn set_parent(&self, fk: &ForeignKey, child_id: i32, parent_id: Option<i32>) -> Result<bool> {
        let updated = self.write(|conn| {
            if !row_exists(conn, fk.table, child_id)? {
                return Ok(false);
            }
            check_references(conn, fk.table, &[(fk.column, parent_id)])?;
            diesel::sql_query(format!(
                "UPDATE {} SET {} = ? WHERE id = ?",
                fk.table.quoted(),
                fk.column
            ))
            .bind::<Nullable<Integer>, _>(parent_id)
            .bind::<Integer, _>(child_id)
            .execute(conn)?;
            Ok(true)
        })?;
        if updated {
            debug!(table = %fk.table, id = child_id, column = fk.column, ?parent_id, "reference updated");
        }
        Ok(updated)
    }

    fn delete_row(&self, table: Table, id: i32) -> Result<bool> {
        let policy = self.on_delete;
        self.write(|conn| delete_with_policy(conn, table, id, policy))
    }
}

// -----------------------------------------------------------------------------
// Typed entity stores
// -----------------------------------------------------------------------------

/// Implements [`EntityStore`] for an entity backed by a Diesel table.
///
/// Inserts and updates validate the draft, check its references, write the
/// row and read it back, all in one transaction.
macro_rules! sqlite_entity_store {
    ($entity:ty, $row:ty, $new_row:ty, $table:ident) => {
        impl EntityStore<$entity> for SqliteStore {
            fn insert(&self, draft: &<$entity as Entity>::Draft) -> Result<$entity> {
                let table = <$entity as Entity>::TABLE;
                let row = <$new_row>::try_from(draft)?;
                let stored: $row = self.write(|conn| {
                    check_references(conn, table, &draft.references())?;
                    diesel::insert_into($table::table)
                        .values(&row)
                        .execute(conn)?;
                    let id = last_insert_id(conn)?;
                    Ok($table::table
                        .find(id)
                        .select(<$row>::as_select())
                        .first(conn)?)
                })?;
                debug!(%table, id = stored.id, "row inserted");
                Ok(stored.into())
            }

            fn get(&self, id: Id<$entity>) -> Result<Option<$entity>> {
                let mut conn = self.conn()?;
                let row: Option<$row> = $table::table
                    .find(id.get())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .optional()?;
                Ok(row.map(Into::into))
            }

            fn list(&self) -> Result<Vec<$entity>> {
                let mut conn = self.conn()?;
                let rows: Vec<$row> = $table::table
                    .order($table::id.asc())
                    .select(<$row>::as_select())
                    .load(&mut conn)?;
                Ok(rows.into_iter().map(Into::into).collect())
            }

            fn update(
                &self,
                id: Id<$entity>,
                draft: &<$entity as Entity>::Draft,
            ) -> Result<Option<$entity>> {
                let table = <$entity as Entity>::TABLE;
                let row = <$new_row>::try_from(draft)?;
                let updated: Option<$row> = self.write(|conn| {
                    if !row_exists(conn, table, id.get())? {
                        return Ok(None);
                    }
                    check_references(conn, table, &draft.references())?;
                    diesel::update($table::table.find(id.get()))
                        .set(&row)
                        .execute(conn)?;
                    Ok(Some(
                        $table::table
                            .find(id.get())
                            .select(<$row>::as_select())
                            .first(conn)?,
                    ))
                })?;
                if updated.is_some() {
                    debug!(%table, id = id.get(), "row updated");
                }
                Ok(updated.map(Into::into))
            }

            fn delete(&self, id: Id<$entity>) -> Result<bool> {
                self.delete_row(<$entity as Entity>::TABLE, id.get())
            }
        }
    };
}

sqlite_entity_store!(Customer, CustomerRow, NewCustomerRow, customer);
sqlite_entity_store!(Employee, EmployeeRow, NewEmployeeRow, employee);
sqlite_entity_store!(Product, ProductRow, NewProductRow, product);
sqlite_entity_store!(Promotion, PromotionRow, NewPromotionRow, promotion);
sqlite_entity_store!(Supplier, SupplierRow, NewSupplierRow, supplier);
sqlite_entity_store!(
    CustomerFeedback,
    CustomerFeedbackRow,
    NewCustomerFeedbackRow,
    customer_feedback
);
sqlite_entity_store!(Department, DepartmentRow, NewDepartmentRow, department);
sqlite_entity_store!(Inventory, InventoryRow, NewInventoryRow, inventory);
sqlite_entity_store!(Order, OrderRow, NewOrderRow, orders);
sqlite_entity_store!(OrderDetail, OrderDetailRow, NewOrderDetailRow, order_detail);
sqlite_entity_store!(
    OrderPromotion,
    OrderPromotionRow,
    NewOrderPromotionRow,
    order_promotion
);
sqlite_entity_store!(Shipment, ShipmentRow, NewShipmentRow, shipment);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCustomer, NewDepartment, NewEmployee, NewOrder, NewShipment};

    fn setup_test_store(policy: DeletePolicy) -> SqliteStore {
        let config = DatabaseConfig {
            on_delete: policy,
            ..DatabaseConfig::in_memory()
        };
        SqliteStore::open(&config).unwrap()
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let a: Customer = store.insert(&NewCustomer::named("Ada")).unwrap();
        let b: Customer = store.insert(&NewCustomer::named("Grace")).unwrap();
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
    }

    #[test]
    fn get_missing_row_returns_none() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let found: Option<Customer> = store.get(Id::new(42)).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn update_missing_row_returns_none() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let updated: Option<Employee> = store
            .update(
                Id::new(7),
                &NewEmployee {
                    name: Some("Nobody".into()),
                    role: None,
                },
            )
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn update_missing_row_with_dangling_parent_returns_none() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let updated: Option<Order> = store
            .update(Id::new(5), &NewOrder::for_customer(Id::new(9)))
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn delete_missing_row_returns_false() {
        let store = setup_test_store(DeletePolicy::Restrict);
        assert!(!EntityStore::<Customer>::delete(&store, Id::new(1)).unwrap());
    }

    #[test]
    fn missing_parent_is_rejected_before_engine() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let err = EntityStore::<Order>::insert(&store, &NewOrder::for_customer(Id::new(9)))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Constraint(ConstraintError::MissingParent {
                table: Table::Order,
                column: "customer_id",
                parent: Table::Customer,
                id: 9,
            })
        ));
    }

    #[test]
    fn attach_sets_parent_reference() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let customer: Customer = store.insert(&NewCustomer::named("Ada")).unwrap();
        let order: Order = store.insert(&NewOrder::for_customer(customer.id)).unwrap();

        let fk = ForeignKey::find(Table::Shipment, "order_id").unwrap();
        let shipment: Shipment = store
            .attach(
                fk,
                order.id.get(),
                &NewShipment {
                    status: Some("pending".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(shipment.order_id, order.id);
        assert_eq!(store.order_shipments(order.id).unwrap(), vec![shipment]);
    }

    #[test]
    fn attach_rejects_foreign_key_of_another_table() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let fk = ForeignKey::find(Table::Order, "customer_id").unwrap();
        let err = store
            .attach::<Shipment>(fk, 1, &NewShipment::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Constraint(ConstraintError::UnknownReference { .. })
        ));
    }

    #[test]
    fn cascade_clears_nullable_manager_reference() {
        let store = setup_test_store(DeletePolicy::Cascade);
        let manager: Employee = store
            .insert(&NewEmployee {
                name: Some("Grace".into()),
                role: Some("Director".into()),
            })
            .unwrap();
        let dept: Department = store
            .insert(&NewDepartment {
                name: Some("Research".into()),
                manager_id: Some(manager.id),
            })
            .unwrap();

        assert!(EntityStore::<Employee>::delete(&store, manager.id).unwrap());

        let dept: Department = store.get(dept.id).unwrap().unwrap();
        assert!(dept.manager_id.is_none());
    }

    #[test]
    fn set_parent_on_missing_child_returns_false() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let fk = ForeignKey::find(Table::Department, "manager_id").unwrap();
        assert!(!store.set_parent(fk, 5, None).unwrap());
    }

    #[test]
    fn parent_id_reads_current_reference() {
        let store = setup_test_store(DeletePolicy::Restrict);
        let customer: Customer = store.insert(&NewCustomer::named("Ada")).unwrap();
        let order: Order = store.insert(&NewOrder::for_customer(customer.id)).unwrap();

        let fk = ForeignKey::find(Table::Order, "customer_id").unwrap();
        assert_eq!(store.parent_id(fk, order.id.get()).unwrap(), Some(customer.id.get()));
        assert_eq!(store.parent_id(fk, 99).unwrap(), None);
    }
}
