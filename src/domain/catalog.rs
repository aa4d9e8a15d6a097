//! Products, suppliers, stock levels and promotions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::{unknown_reference, Draft, Entity};
use super::error::{required, ConstraintError};
use super::id::Id;
use super::schema::Table;

/// A product with its list price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id<Product>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl Draft for NewProduct {
    const TABLE: Table = Table::Product;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        required(self.price, Self::TABLE, "price")?;
        Ok(())
    }
}

impl Entity for Product {
    type Draft = NewProduct;
    const TABLE: Table = Table::Product;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

/// A supplier and its contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Id<Supplier>,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewSupplier {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
}

impl Draft for NewSupplier {
    const TABLE: Table = Table::Supplier;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        Ok(())
    }
}

impl Entity for Supplier {
    type Draft = NewSupplier;
    const TABLE: Table = Table::Supplier;

    fn id(&self) -> Id<Self> {
        self.id
    }
}

/// Stock of one product held by one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: Id<Inventory>,
    pub product_id: Id<Product>,
    pub supplier_id: Id<Supplier>,
    pub quantity_in_stock: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewInventory {
    pub product_id: Option<Id<Product>>,
    pub supplier_id: Option<Id<Supplier>>,
    pub quantity_in_stock: Option<i32>,
}

impl Draft for NewInventory {
    const TABLE: Table = Table::Inventory;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.product_id, Self::TABLE, "product_id")?;
        required(self.supplier_id, Self::TABLE, "supplier_id")?;
        required(self.quantity_in_stock, Self::TABLE, "quantity_in_stock")?;
        Ok(())
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("product_id", self.product_id.map(Id::get)),
            ("supplier_id", self.supplier_id.map(Id::get)),
        ]
    }

    fn set_reference(&mut self, column: &str, id: Option<i32>) -> Result<(), ConstraintError> {
        match column {
            "product_id" => self.product_id = id.map(Id::new),
            "supplier_id" => self.supplier_id = id.map(Id::new),
            _ => return Err(unknown_reference(Self::TABLE, column)),
        }
        Ok(())
    }
}

impl Entity for Inventory {
    type Draft = NewInventory;
    const TABLE: Table = Table::Inventory;

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn references(&self) -> Vec<(&'static str, Option<i32>)> {
        vec![
            ("product_id", Some(self.product_id.get())),
            ("supplier_id", Some(self.supplier_id.get())),
        ]
    }
}

/// A discount that can be applied to orders within a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Id<Promotion>,
    pub name: String,
    pub discount_percentage: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewPromotion {
    pub name: Option<String>,
    pub discount_percentage: Option<f64>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl Draft for NewPromotion {
    const TABLE: Table = Table::Promotion;

    fn validate(&self) -> Result<(), ConstraintError> {
        required(self.name.as_ref(), Self::TABLE, "name")?;
        required(self.discount_percentage, Self::TABLE, "discount_percentage")?;
        required(self.start_date, Self::TABLE, "start_date")?;
        required(self.end_date, Self::TABLE, "end_date")?;
        Ok(())
    }
}

impl Entity for Promotion {
    type Draft = NewPromotion;
    const TABLE: Table = Table::Promotion;

    fn id(&self) -> Id<Self> {
        self.id
    }
}
