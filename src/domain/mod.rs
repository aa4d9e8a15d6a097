//! Data model: entity records, their drafts, and the schema catalog.
//!
//! Entities are grouped by the part of the business they describe:
//!
//! - [`customer`] - `Customer`, `CustomerFeedback`
//! - [`staff`] - `Employee`, `Department`
//! - [`catalog`] - `Product`, `Supplier`, `Inventory`, `Promotion`
//! - [`order`] - `Order`, `OrderDetail`, `OrderPromotion`, `Shipment`

pub mod catalog;
pub mod customer;
pub mod entity;
pub mod error;
pub mod id;
pub mod order;
pub mod schema;
pub mod staff;

pub use catalog::{
    Inventory, NewInventory, NewProduct, NewPromotion, NewSupplier, Product, Promotion, Supplier,
};
pub use customer::{Customer, CustomerFeedback, NewCustomer, NewCustomerFeedback};
pub use entity::{Draft, Entity};
pub use error::ConstraintError;
pub use id::Id;
pub use order::{
    NewOrder, NewOrderDetail, NewOrderPromotion, NewShipment, Order, OrderDetail, OrderPromotion,
    Shipment,
};
pub use schema::{Column, ForeignKey, SqlType, Table, FOREIGN_KEYS};
pub use staff::{Department, Employee, NewDepartment, NewEmployee};
