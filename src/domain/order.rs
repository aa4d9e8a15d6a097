//! Orders and the rows that hang off them: line items, applied promotions
//! and shipments.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::catalog::{Product, Promotion};
use super::customer::Customer;
use super::entity::{unknown_reference, Draft, Entity};
use super::error::{required, ConstraintError};
use super::id::Id;
use super::schema::Table;

/// A customer order and its total amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Id<Order>,
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: Id<Customer>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewOrder {
    pub order_date: Option<NaiveDateTime>,
    pub customer_id: Option<Id<Customer>>,
    pub total_amount: Option<f64>,
}

impl NewOrder {
    /// Start a draft for the given customer.
    #[must_use]
    pub fn for_customer(customer_id: Id<Customer>) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }
}

impl Draft for NewOrder {
    const TABLE: Table = Table::Order;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.customer_id, Self::TABLE, "customer_id")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("customer_id", self.customer_id.map(Id::get))]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "customer_id" => self.customer_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for Order {
    type Draft = NewOrder;
    const TABLE: Table = Table::Order;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("customer_id", Some(self.customer_id.get()))]
    }
}

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: Id<OrderDetail>,
    pub order_id: Id<Order>,
    pub product_id: Id<Product>,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewOrderDetail {
    pub order_id: Option<Id<Order>>,
    pub product_id: Option<Id<Product>>,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
}

impl Draft for NewOrderDetail {
    const TABLE: Table = Table::OrderDetail;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.order_id, Self::TABLE, "order_id")?;
        required(self.product_id, Self::TABLE, "product_id")?;
        required(self.quantity, Self::TABLE, "quantity")?;
        required(self.unit_price, Self::TABLE, "unit_price")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("order_id", self.order_id.map(Id::get)),
            ("product_id", self.product_id.map(Id::get)),
        ]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "order_id" => self.order_id = id.map(Id::new),
            "product_id" => self.product_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for OrderDetail {
    type Draft = NewOrderDetail;
    const TABLE: Table = Table::OrderDetail;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("order_id", Some(self.order_id.get())),
            ("product_id", Some(self.product_id.get())),
        ]
    }
}

/// Link between an order and a promotion applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPromotion {
    pub id: Id<OrderPromotion>,
    pub order_id: Id<Order>,
    pub promotion_id: Id<Promotion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewOrderPromotion {
    pub order_id: Option<Id<Order>>,
    pub promotion_id: Option<Id<Promotion>>,
}

impl Draft for NewOrderPromotion {
    const TABLE: Table = Table::OrderPromotion;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.order_id, Self::TABLE, "order_id")?;
        required(self.promotion_id, Self::TABLE, "promotion_id")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("order_id", self.order_id.map(Id::get)),
            ("promotion_id", self.promotion_id.map(Id::get)),
        ]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "order_id" => self.order_id = id.map(Id::new),
            "promotion_id" => self.promotion_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for OrderPromotion {
    type Draft = NewOrderPromotion;
    const TABLE: Table = Table::OrderPromotion;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("order_id", Some(self.order_id.get())),
            ("promotion_id", Some(self.promotion_id.get())),
        ]
    }
}

/// A shipment of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Id<Shipment>,
    pub order_id: Id<Order>,
    pub destination: Option<String>,
    pub shipped_date: Option<NaiveDateTime>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewShipment {
    pub order_id: Option<Id<Order>>,
    pub destination: Option<String>,
    pub shipped_date: Option<NaiveDateTime>,
    pub status: Option<String>,
}

impl Draft for NewShipment {
    const TABLE: Table = Table::Shipment;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.order_id, Self::TABLE, "order_id")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("order_id", self.order_id.map(Id::get))]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "order_id" => self.order_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for Shipment {
    type Draft = NewShipment;
    const TABLE: Table = Table::Shipment;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![("order_id", Some(self.order_id.get()))]
    }
}
