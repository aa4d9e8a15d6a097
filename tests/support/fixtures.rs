use chrono::NaiveDateTime;
use crmdb::adapter::outbound::sqlite::store::SqliteStore;
use crmdb::domain::{
    Customer, CustomerFeedback, Department, Employee, Inventory, NewCustomer,
    NewCustomerFeedback, NewDepartment, NewEmployee, NewInventory, NewOrder, NewOrderDetail,
    NewOrderPromotion, NewProduct, NewPromotion, NewShipment, NewSupplier, Order, OrderDetail,
    OrderPromotion, Product, Promotion, Shipment, Supplier,
};
use crmdb::port::outbound::store::EntityStore;

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

pub fn customer_draft() -> NewCustomer {
    NewCustomer {
        name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        phone: Some("555-0100".into()),
        address: Some("12 St James's Square, London".into()),
    }
}

pub fn employee_draft() -> NewEmployee {
    NewEmployee {
        name: Some("Grace Hopper".into()),
        role: Some("Director".into()),
    }
}

pub fn product_draft() -> NewProduct {
    NewProduct {
        name: Some("Difference Engine".into()),
        description: Some("Mechanical calculator".into()),
        price: Some(1999.95),
    }
}

pub fn promotion_draft() -> NewPromotion {
    NewPromotion {
        name: Some("Spring Sale".into()),
        discount_percentage: Some(15.0),
        start_date: Some(at("2024-03-01 00:00:00")),
        end_date: Some(at("2024-03-31 23:59:59")),
    }
}

pub fn supplier_draft() -> NewSupplier {
    NewSupplier {
        name: Some("Babbage & Co".into()),
        contact_name: Some("Charles".into()),
        phone: Some("555-0199".into()),
    }
}

/// One row in every table, wired together.
pub struct Seeded {
    pub customer: Customer,
    pub employee: Employee,
    pub product: Product,
    pub promotion: Promotion,
    pub supplier: Supplier,
    pub feedback: CustomerFeedback,
    pub department: Department,
    pub inventory: Inventory,
    pub order: Order,
    pub detail: OrderDetail,
    pub order_promotion: OrderPromotion,
    pub shipment: Shipment,
}

pub fn seed_all(store: &SqliteStore) -> Seeded {
    let customer: Customer = store.insert(&customer_draft()).unwrap();
    let employee: Employee = store.insert(&employee_draft()).unwrap();
    let product: Product = store.insert(&product_draft()).unwrap();
    let promotion: Promotion = store.insert(&promotion_draft()).unwrap();
    let supplier: Supplier = store.insert(&supplier_draft()).unwrap();

    let feedback: CustomerFeedback = store
        .insert(&NewCustomerFeedback {
            customer_id: Some(customer.id),
            feedback_date: Some(at("2024-03-05 10:15:00")),
            comments: Some("Prompt delivery".into()),
        })
        .unwrap();
    let department: Department = store
        .insert(&NewDepartment {
            name: Some("Research".into()),
            manager_id: Some(employee.id),
        })
        .unwrap();
    let inventory: Inventory = store
        .insert(&NewInventory {
            product_id: Some(product.id),
            supplier_id: Some(supplier.id),
            quantity_in_stock: Some(12),
        })
        .unwrap();
    let order: Order = store
        .insert(&NewOrder {
            order_date: Some(at("2024-03-04 09:30:00")),
            customer_id: Some(customer.id),
            total_amount: Some(1699.96),
        })
        .unwrap();
    let detail: OrderDetail = store
        .insert(&NewOrderDetail {
            order_id: Some(order.id),
            product_id: Some(product.id),
            quantity: Some(1),
            unit_price: Some(1999.95),
        })
        .unwrap();
    let order_promotion: OrderPromotion = store
        .insert(&NewOrderPromotion {
            order_id: Some(order.id),
            promotion_id: Some(promotion.id),
        })
        .unwrap();
    let shipment: Shipment = store
        .insert(&NewShipment {
            order_id: Some(order.id),
            destination: Some("London".into()),
            shipped_date: Some(at("2024-03-06 14:00:00")),
            status: Some("shipped".into()),
        })
        .unwrap();

    Seeded {
        customer,
        employee,
        product,
        promotion,
        supplier,
        feedback,
        department,
        inventory,
        order,
        detail,
        order_promotion,
        shipment,
    }
}
