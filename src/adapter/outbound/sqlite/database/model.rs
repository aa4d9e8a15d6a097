//! Database model types for Diesel ORM.
//!
//! Each table has a queryable row and an insertable row. The insertable row
//! doubles as the changeset for full-replacement updates, so unset nullable
//! columns are written as NULL rather than skipped.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{
    customer, customer_feedback, department, employee, inventory, order_detail, order_promotion,
    orders, product, promotion, shipment, supplier,
};
use crate::domain::error::{required, ConstraintError};
use crate::domain::{
    Customer, CustomerFeedback, Department, Draft, Employee, Id, Inventory, NewCustomer,
    NewCustomerFeedback, NewDepartment, NewEmployee, NewInventory, NewOrder, NewOrderDetail,
    NewOrderPromotion, NewProduct, NewPromotion, NewShipment, NewSupplier, Order, OrderDetail,
    OrderPromotion, Product, Promotion, Shipment, Supplier,
};

/// Database row for a customer.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = customer)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Database row for a customer (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = customer)]
#[diesel(treat_none_as_null = true)]
pub struct NewCustomerRow {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
        }
    }
}

impl TryFrom<&NewCustomer> for NewCustomerRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewCustomer) -> Result<Self, Self::Error> {
        let table = NewCustomer::TABLE;
        Ok(Self {
            name: required(draft.name.clone(), table, "name")?,
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
        })
    }
}

/// Database row for an employee.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = employee)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
}

/// Database row for an employee (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = employee)]
#[diesel(treat_none_as_null = true)]
pub struct NewEmployeeRow {
    pub name: String,
    pub role: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            role: row.role,
        }
    }
}

impl TryFrom<&NewEmployee> for NewEmployeeRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewEmployee) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(draft.name.clone(), NewEmployee::TABLE, "name")?,
            role: draft.role.clone(),
        })
    }
}

/// Database row for a product.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = product)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Database row for a product (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = product)]
#[diesel(treat_none_as_null = true)]
pub struct NewProductRow {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

impl TryFrom<&NewProduct> for NewProductRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewProduct) -> Result<Self, Self::Error> {
        let table = NewProduct::TABLE;
        Ok(Self {
            name: required(draft.name.clone(), table, "name")?,
            description: draft.description.clone(),
            price: required(draft.price, table, "price")?,
        })
    }
}

/// Database row for a promotion.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = promotion)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PromotionRow {
    pub id: i32,
    pub name: String,
    pub discount_percentage: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// Database row for a promotion (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = promotion)]
pub struct NewPromotionRow {
    pub name: String,
    pub discount_percentage: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl From<PromotionRow> for Promotion {
    fn from(row: PromotionRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            discount_percentage: row.discount_percentage,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

impl TryFrom<&NewPromotion> for NewPromotionRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewPromotion) -> Result<Self, Self::Error> {
        let table = NewPromotion::TABLE;
        Ok(Self {
            name: required(draft.name.clone(), table, "name")?,
            discount_percentage: required(draft.discount_percentage, table, "discount_percentage")?,
            start_date: required(draft.start_date, table, "start_date")?,
            end_date: required(draft.end_date, table, "end_date")?,
        })
    }
}

/// Database row for a supplier.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = supplier)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SupplierRow {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
}

/// Database row for a supplier (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = supplier)]
#[diesel(treat_none_as_null = true)]
pub struct NewSupplierRow {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            contact_name: row.contact_name,
            phone: row.phone,
        }
    }
}

impl TryFrom<&NewSupplier> for NewSupplierRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewSupplier) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(draft.name.clone(), NewSupplier::TABLE, "name")?,
            contact_name: draft.contact_name.clone(),
            phone: draft.phone.clone(),
        })
    }
}

/// Database row for customer feedback.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = customer_feedback)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerFeedbackRow {
    pub id: i32,
    pub customer_id: i32,
    pub feedback_date: Option<NaiveDateTime>,
    pub comments: Option<String>,
}

/// Database row for customer feedback (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = customer_feedback)]
#[diesel(treat_none_as_null = true)]
pub struct NewCustomerFeedbackRow {
    pub customer_id: i32,
    pub feedback_date: Option<NaiveDateTime>,
    pub comments: Option<String>,
}

impl From<CustomerFeedbackRow> for CustomerFeedback {
    fn from(row: CustomerFeedbackRow) -> Self {
        Self {
            id: Id::new(row.id),
            customer_id: Id::new(row.customer_id),
            feedback_date: row.feedback_date,
            comments: row.comments,
        }
    }
}

impl TryFrom<&NewCustomerFeedback> for NewCustomerFeedbackRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewCustomerFeedback) -> Result<Self, Self::Error> {
        let table = NewCustomerFeedback::TABLE;
        Ok(Self {
            customer_id: required(draft.customer_id, table, "customer_id")?.get(),
            feedback_date: draft.feedback_date,
            comments: draft.comments.clone(),
        })
    }
}

/// Database row for a department.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = department)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepartmentRow {
    pub id: i32,
    pub name: String,
    pub manager_id: Option<i32>,
}

/// Database row for a department (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = department)]
#[diesel(treat_none_as_null = true)]
pub struct NewDepartmentRow {
    pub name: String,
    pub manager_id: Option<i32>,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: Id::new(row.id),
            name: row.name,
            manager_id: row.manager_id.map(Id::new),
        }
    }
}

impl TryFrom<&NewDepartment> for NewDepartmentRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewDepartment) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(draft.name.clone(), NewDepartment::TABLE, "name")?,
            manager_id: draft.manager_id.map(Id::get),
        })
    }
}

/// Database row for an inventory level.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = inventory)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InventoryRow {
    pub id: i32,
    pub product_id: i32,
    pub supplier_id: i32,
    pub quantity_in_stock: i32,
}

/// Database row for an inventory level (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = inventory)]
pub struct NewInventoryRow {
    pub product_id: i32,
    pub supplier_id: i32,
    pub quantity_in_stock: i32,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: Id::new(row.id),
            product_id: Id::new(row.product_id),
            supplier_id: Id::new(row.supplier_id),
            quantity_in_stock: row.quantity_in_stock,
        }
    }
}

impl TryFrom<&NewInventory> for NewInventoryRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewInventory) -> Result<Self, Self::Error> {
        let table = NewInventory::TABLE;
        Ok(Self {
            product_id: required(draft.product_id, table, "product_id")?.get(),
            supplier_id: required(draft.supplier_id, table, "supplier_id")?.get(),
            quantity_in_stock: required(draft.quantity_in_stock, table, "quantity_in_stock")?,
        })
    }
}

/// Database row for an order.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i32,
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: i32,
    pub total_amount: Option<f64>,
}

/// Database row for an order (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct NewOrderRow {
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: i32,
    pub total_amount: Option<f64>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: Id::new(row.id),
            order_date: row.order_date,
            customer_id: Id::new(row.customer_id),
            total_amount: row.total_amount,
        }
    }
}

impl TryFrom<&NewOrder> for NewOrderRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            order_date: draft.order_date,
            customer_id: required(draft.customer_id, NewOrder::TABLE, "customer_id")?.get(),
            total_amount: draft.total_amount,
        })
    }
}

/// Database row for an order line.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = order_detail)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderDetailRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Database row for an order line (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = order_detail)]
pub struct NewOrderDetailRow {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

impl From<OrderDetailRow> for OrderDetail {
    fn from(row: OrderDetailRow) -> Self {
        Self {
            id: Id::new(row.id),
            order_id: Id::new(row.order_id),
            product_id: Id::new(row.product_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

impl TryFrom<&NewOrderDetail> for NewOrderDetailRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewOrderDetail) -> Result<Self, Self::Error> {
        let table = NewOrderDetail::TABLE;
        Ok(Self {
            order_id: required(draft.order_id, table, "order_id")?.get(),
            product_id: required(draft.product_id, table, "product_id")?.get(),
            quantity: required(draft.quantity, table, "quantity")?,
            unit_price: required(draft.unit_price, table, "unit_price")?,
        })
    }
}

/// Database row for an applied promotion.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = order_promotion)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderPromotionRow {
    pub id: i32,
    pub order_id: i32,
    pub promotion_id: i32,
}

/// Database row for an applied promotion (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = order_promotion)]
pub struct NewOrderPromotionRow {
    pub order_id: i32,
    pub promotion_id: i32,
}

impl From<OrderPromotionRow> for OrderPromotion {
    fn from(row: OrderPromotionRow) -> Self {
        Self {
            id: Id::new(row.id),
            order_id: Id::new(row.order_id),
            promotion_id: Id::new(row.promotion_id),
        }
    }
}

impl TryFrom<&NewOrderPromotion> for NewOrderPromotionRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewOrderPromotion) -> Result<Self, Self::Error> {
        let table = NewOrderPromotion::TABLE;
        Ok(Self {
            order_id: required(draft.order_id, table, "order_id")?.get(),
            promotion_id: required(draft.promotion_id, table, "promotion_id")?.get(),
        })
    }
}

/// Database row for a shipment.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = shipment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShipmentRow {
    pub id: i32,
    pub order_id: i32,
    pub destination: Option<String>,
    pub shipped_date: Option<NaiveDateTime>,
    pub status: Option<String>,
}

/// Database row for a shipment (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = shipment)]
#[diesel(treat_none_as_null = true)]
pub struct NewShipmentRow {
    pub order_id: i32,
    pub destination: Option<String>,
    pub shipped_date: Option<NaiveDateTime>,
    pub status: Option<String>,
}

impl From<ShipmentRow> for Shipment {
    fn from(row: ShipmentRow) -> Self {
        Self {
            id: Id::new(row.id),
            order_id: Id::new(row.order_id),
            destination: row.destination,
            shipped_date: row.shipped_date,
            status: row.status,
        }
    }
}

impl TryFrom<&NewShipment> for NewShipmentRow {
    type Error = ConstraintError;

    fn try_from(draft: &NewShipment) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: required(draft.order_id, NewShipment::TABLE, "order_id")?.get(),
            destination: draft.destination.clone(),
            shipped_date: draft.shipped_date,
            status: draft.status.clone(),
        })
    }
}
