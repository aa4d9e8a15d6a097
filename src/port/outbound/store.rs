//! Persistence ports for entities and their relationships.

use crate::domain::schema::{ForeignKey, Table};
use crate::domain::{
    Customer, CustomerFeedback, Department, Employee, Entity, Id, Inventory, Order, OrderDetail,
    OrderPromotion, Product, Promotion, Shipment, Supplier,
};
use crate::error::Result;

/// Typed storage operations for one entity.
pub trait EntityStore<E: Entity> {
    /// Insert a new row and return it with its assigned id.
    fn insert(&self, draft: &E::Draft) -> Result<E>;

    /// Get a row by id.
    fn get(&self, id: Id<E>) -> Result<Option<E>>;

    /// List all rows ordered by id.
    fn list(&self) -> Result<Vec<E>>;

    /// Replace every column of an existing row. Returns `None` if the row
    /// does not exist.
    fn update(&self, id: Id<E>, draft: &E::Draft) -> Result<Option<E>>;

    /// Delete a row under the configured delete policy. Returns whether a
    /// row was deleted.
    fn delete(&self, id: Id<E>) -> Result<bool>;
}

/// Referential operations driven by the schema catalog.
pub trait RelationshipStore {
    /// Whether `table` holds a row with `id`.
    fn exists(&self, table: Table, id: i32) -> Result<bool>;

    /// Ids of the children referencing `parent_id` through `fk`, ascending.
    fn child_ids(&self, fk: &ForeignKey, parent_id: i32) -> Result<Vec<i32>>;

    /// The parent id the child row currently references through `fk`.
    /// `None` if the child is missing or the reference is unset.
    fn parent_id(&self, fk: &ForeignKey, child_id: i32) -> Result<Option<i32>>;

    /// Point the child's foreign key at another parent, or clear it.
    /// Returns whether the child row exists.
    fn set_parent(&self, fk: &ForeignKey, child_id: i32, parent_id: Option<i32>) -> Result<bool>;

    /// Delete a row of any table under the configured delete policy.
    fn delete_row(&self, table: Table, id: i32) -> Result<bool>;
}

/// Storage for the whole data model.
pub trait Store:
    RelationshipStore
    + EntityStore<Customer>
    + EntityStore<Employee>
    + EntityStore<Product>
    + EntityStore<Promotion>
    + EntityStore<Supplier>
    + EntityStore<CustomerFeedback>
    + EntityStore<Department>
    + EntityStore<Inventory>
    + EntityStore<Order>
    + EntityStore<OrderDetail>
    + EntityStore<OrderPromotion>
    + EntityStore<Shipment>
{
}

impl<T> Store for T where
    T: RelationshipStore
        + EntityStore<Customer>
        + EntityStore<Employee>
        + EntityStore<Product>
        + EntityStore<Promotion>
        + EntityStore<Supplier>
        + EntityStore<CustomerFeedback>
        + EntityStore<Department>
        + EntityStore<Inventory>
        + EntityStore<Order>
        + EntityStore<OrderDetail>
        + EntityStore<OrderPromotion>
        + EntityStore<Shipment>
{
}
