//! Static schema catalog.
//!
//! Describes every table, column and foreign key of the persisted layout.
//! The catalog is the single source the store consults for referential
//! checks, cascade walks and relationship rendering, and the integration
//! tests compare it against the live database.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Every table in the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Table {
    Customer,
    Employee,
    Product,
    Promotion,
    Supplier,
    CustomerFeedback,
    Department,
    Inventory,
    Order,
    OrderDetail,
    OrderPromotion,
    Shipment,
}

/// SQL column type, as declared in the DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Varchar(u16),
    Float,
    DateTime,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "INTEGER"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Float => write!(f, "FLOAT"),
            Self::DateTime => write!(f, "DATETIME"),
        }
    }
}

/// A column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Column {
    const fn key() -> Self {
        Self {
            name: "id",
            sql_type: SqlType::Integer,
            nullable: false,
            primary_key: true,
        }
    }

    const fn required(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            primary_key: false,
        }
    }

    const fn optional(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            primary_key: false,
        }
    }
}

/// A reference from a child table to its parent's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Table holding the foreign key column.
    pub table: Table,
    /// Foreign key column in `table`.
    pub column: &'static str,
    /// Referenced table.
    pub parent: Table,
    /// Whether the reference may be left unset.
    pub nullable: bool,
    /// Accessor name on the child for its parent.
    pub parent_role: &'static str,
    /// Collection name on the parent for its children.
    pub collection: &'static str,
}

impl ForeignKey {
    /// Look up the foreign key held by `table` in `column`.
    #[must_use]
    pub fn find(table: Table, column: &str) -> Option<&'static ForeignKey> {
        FOREIGN_KEYS
            .iter()
            .find(|fk| fk.table == table && fk.column == column)
    }
}

/// All foreign keys in the model.
pub const FOREIGN_KEYS: &[ForeignKey] = &[
    ForeignKey {
        table: Table::CustomerFeedback,
        column: "customer_id",
        parent: Table::Customer,
        nullable: false,
        parent_role: "customer",
        collection: "CustomerFeedbackList",
    },
    ForeignKey {
        table: Table::Department,
        column: "manager_id",
        parent: Table::Employee,
        nullable: true,
        parent_role: "manager",
        collection: "DepartmentList",
    },
    ForeignKey {
        table: Table::Inventory,
        column: "product_id",
        parent: Table::Product,
        nullable: false,
        parent_role: "product",
        collection: "InventoryList",
    },
    ForeignKey {
        table: Table::Inventory,
        column: "supplier_id",
        parent: Table::Supplier,
        nullable: false,
        parent_role: "supplier",
        collection: "InventoryList",
    },
    ForeignKey {
        table: Table::Order,
        column: "customer_id",
        parent: Table::Customer,
        nullable: false,
        parent_role: "customer",
        collection: "OrderList",
    },
    ForeignKey {
        table: Table::OrderDetail,
        column: "order_id",
        parent: Table::Order,
        nullable: false,
        parent_role: "order",
        collection: "OrderDetailList",
    },
    ForeignKey {
        table: Table::OrderDetail,
        column: "product_id",
        parent: Table::Product,
        nullable: false,
        parent_role: "product",
        collection: "OrderDetailList",
    },
    ForeignKey {
        table: Table::OrderPromotion,
        column: "order_id",
        parent: Table::Order,
        nullable: false,
        parent_role: "order",
        collection: "OrderPromotionList",
    },
    ForeignKey {
        table: Table::OrderPromotion,
        column: "promotion_id",
        parent: Table::Promotion,
        nullable: false,
        parent_role: "promotion",
        collection: "OrderPromotionList",
    },
    ForeignKey {
        table: Table::Shipment,
        column: "order_id",
        parent: Table::Order,
        nullable: false,
        parent_role: "order",
        collection: "ShipmentList",
    },
];

const CUSTOMER_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::optional("email", SqlType::Varchar(100)),
    Column::optional("phone", SqlType::Varchar(15)),
    Column::optional("address", SqlType::Varchar(250)),
];

const EMPLOYEE_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::optional("role", SqlType::Varchar(50)),
];

const PRODUCT_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::optional("description", SqlType::Varchar(250)),
    Column::required("price", SqlType::Float),
];

const PROMOTION_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::required("discount_percentage", SqlType::Float),
    Column::required("start_date", SqlType::DateTime),
    Column::required("end_date", SqlType::DateTime),
];

const SUPPLIER_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::optional("contact_name", SqlType::Varchar(50)),
    Column::optional("phone", SqlType::Varchar(15)),
];

const CUSTOMER_FEEDBACK_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("customer_id", SqlType::Integer),
    Column::optional("feedback_date", SqlType::DateTime),
    Column::optional("comments", SqlType::Varchar(250)),
];

const DEPARTMENT_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("name", SqlType::Varchar(50)),
    Column::optional("manager_id", SqlType::Integer),
];

const INVENTORY_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("product_id", SqlType::Integer),
    Column::required("supplier_id", SqlType::Integer),
    Column::required("quantity_in_stock", SqlType::Integer),
];

const ORDER_COLUMNS: &[Column] = &[
    Column::key(),
    Column::optional("order_date", SqlType::DateTime),
    Column::required("customer_id", SqlType::Integer),
    Column::optional("total_amount", SqlType::Float),
];

const ORDER_DETAIL_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("order_id", SqlType::Integer),
    Column::required("product_id", SqlType::Integer),
    Column::required("quantity", SqlType::Integer),
    Column::required("unit_price", SqlType::Float),
];

const ORDER_PROMOTION_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("order_id", SqlType::Integer),
    Column::required("promotion_id", SqlType::Integer),
];

const SHIPMENT_COLUMNS: &[Column] = &[
    Column::key(),
    Column::required("order_id", SqlType::Integer),
    Column::optional("destination", SqlType::Varchar(250)),
    Column::optional("shipped_date", SqlType::DateTime),
    Column::optional("status", SqlType::Varchar(50)),
];

impl Table {
    /// Every table, parents before children.
    pub const ALL: [Table; 12] = [
        Table::Customer,
        Table::Employee,
        Table::Product,
        Table::Promotion,
        Table::Supplier,
        Table::CustomerFeedback,
        Table::Department,
        Table::Inventory,
        Table::Order,
        Table::OrderDetail,
        Table::OrderPromotion,
        Table::Shipment,
    ];

    /// SQL table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Employee => "employee",
            Self::Product => "product",
            Self::Promotion => "promotion",
            Self::Supplier => "supplier",
            Self::CustomerFeedback => "customer_feedback",
            Self::Department => "department",
            Self::Inventory => "inventory",
            Self::Order => "order",
            Self::OrderDetail => "order_detail",
            Self::OrderPromotion => "order_promotion",
            Self::Shipment => "shipment",
        }
    }

    /// Resource type name used in rendered documents.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Employee => "Employee",
            Self::Product => "Product",
            Self::Promotion => "Promotion",
            Self::Supplier => "Supplier",
            Self::CustomerFeedback => "CustomerFeedback",
            Self::Department => "Department",
            Self::Inventory => "Inventory",
            Self::Order => "Order",
            Self::OrderDetail => "OrderDetail",
            Self::OrderPromotion => "OrderPromotion",
            Self::Shipment => "Shipment",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Customer => {
                "Stores customer details such as name, contact information, and address."
            }
            Self::Employee => "Lists employees and their roles within the company.",
            Self::Product => "Stores product details including name, description, and price.",
            Self::Promotion => "Defines promotions applicable to orders.",
            Self::Supplier => "Contains supplier details such as name and contact information.",
            Self::CustomerFeedback => {
                "Records feedback from customers about products and services."
            }
            Self::Department => "Organizes employees into departments.",
            Self::Inventory => "Tracks product inventory levels by supplier.",
            Self::Order => {
                "Records customer orders with references to customers and the total amount."
            }
            Self::OrderDetail => {
                "Stores order details referencing orders and products, including quantity and unit price."
            }
            Self::OrderPromotion => "Links promotions to orders to show applicable discounts.",
            Self::Shipment => "Manages shipments of orders including destination and status.",
        }
    }

    /// Columns in declaration order, primary key first.
    #[must_use]
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::Customer => CUSTOMER_COLUMNS,
            Self::Employee => EMPLOYEE_COLUMNS,
            Self::Product => PRODUCT_COLUMNS,
            Self::Promotion => PROMOTION_COLUMNS,
            Self::Supplier => SUPPLIER_COLUMNS,
            Self::CustomerFeedback => CUSTOMER_FEEDBACK_COLUMNS,
            Self::Department => DEPARTMENT_COLUMNS,
            Self::Inventory => INVENTORY_COLUMNS,
            Self::Order => ORDER_COLUMNS,
            Self::OrderDetail => ORDER_DETAIL_COLUMNS,
            Self::OrderPromotion => ORDER_PROMOTION_COLUMNS,
            Self::Shipment => SHIPMENT_COLUMNS,
        }
    }

    /// Foreign keys held by this table.
    pub fn foreign_keys(self) -> impl Iterator<Item = &'static ForeignKey> {
        FOREIGN_KEYS.iter().filter(move |fk| fk.table == self)
    }

    /// Foreign keys in other tables that reference this table.
    pub fn referenced_by(self) -> impl Iterator<Item = &'static ForeignKey> {
        FOREIGN_KEYS.iter().filter(move |fk| fk.parent == self)
    }

    /// Table name quoted for use in raw SQL (`order` is a keyword).
    #[must_use]
    pub fn quoted(self) -> String {
        format!("\"{}\"", self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown table '{0}'")]
pub struct UnknownTable(pub String);

impl FromStr for Table {
    type Err = UnknownTable;

    /// Accepts either the SQL table name (`order_detail`) or the resource
    /// type name (`OrderDetail`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Table::ALL
            .into_iter()
            .find(|table| {
                table.name().eq_ignore_ascii_case(wanted)
                    || table.collection().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_a_primary_key_first() {
        for table in Table::ALL {
            let first = table.columns()[0];
            assert_eq!(first.name, "id", "{table}");
            assert!(first.primary_key);
            assert!(!first.nullable);
            assert_eq!(
                table.columns().iter().filter(|c| c.primary_key).count(),
                1,
                "{table}"
            );
        }
    }

    #[test]
    fn every_foreign_key_column_is_declared_with_matching_nullability() {
        for fk in FOREIGN_KEYS {
            let column = fk
                .table
                .columns()
                .iter()
                .find(|c| c.name == fk.column)
                .unwrap_or_else(|| panic!("{}.{} not declared", fk.table, fk.column));
            assert_eq!(column.sql_type, SqlType::Integer);
            assert_eq!(column.nullable, fk.nullable, "{}.{}", fk.table, fk.column);
        }
    }

    #[test]
    fn only_department_manager_is_optional() {
        let optional: Vec<_> = FOREIGN_KEYS
            .iter()
            .filter(|fk| fk.nullable)
            .map(|fk| (fk.table, fk.column))
            .collect();
        assert_eq!(optional, vec![(Table::Department, "manager_id")]);
    }

    #[test]
    fn order_is_referenced_by_three_child_tables() {
        let children: Vec<_> = Table::Order.referenced_by().map(|fk| fk.table).collect();
        assert_eq!(
            children,
            vec![Table::OrderDetail, Table::OrderPromotion, Table::Shipment]
        );
    }

    #[test]
    fn leaf_tables_are_never_referenced() {
        for table in [
            Table::CustomerFeedback,
            Table::Department,
            Table::Inventory,
            Table::OrderDetail,
            Table::OrderPromotion,
            Table::Shipment,
        ] {
            assert_eq!(table.referenced_by().count(), 0, "{table}");
        }
    }

    #[test]
    fn parents_precede_children_in_all() {
        let position = |t: Table| Table::ALL.iter().position(|x| *x == t).unwrap();
        for fk in FOREIGN_KEYS {
            assert!(position(fk.parent) < position(fk.table), "{fk:?}");
        }
    }

    #[test]
    fn find_foreign_key_by_column() {
        let fk = ForeignKey::find(Table::OrderDetail, "product_id").unwrap();
        assert_eq!(fk.parent, Table::Product);
        assert!(ForeignKey::find(Table::OrderDetail, "quantity").is_none());
        assert!(ForeignKey::find(Table::Customer, "customer_id").is_none());
    }

    #[test]
    fn parse_table_from_sql_or_collection_name() {
        assert_eq!("order_detail".parse::<Table>(), Ok(Table::OrderDetail));
        assert_eq!("OrderDetail".parse::<Table>(), Ok(Table::OrderDetail));
        assert_eq!("ORDER".parse::<Table>(), Ok(Table::Order));
        assert_eq!(
            "invoice".parse::<Table>(),
            Err(UnknownTable("invoice".to_string()))
        );
    }

    #[test]
    fn sql_type_renders_as_ddl() {
        assert_eq!(SqlType::Varchar(250).to_string(), "VARCHAR(250)");
        assert_eq!(SqlType::DateTime.to_string(), "DATETIME");
    }

    #[test]
    fn quoted_name_escapes_keyword() {
        assert_eq!(Table::Order.quoted(), "\"order\"");
    }
}
