// Diesel table definitions matching migrations/.

diesel::table! {
    customer (id) {
        id -> Integer,
        name -> Text,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        address -> Nullable<Text>,
    }
}

diesel::table! {
    employee (id) {
        id -> Integer,
        name -> Text,
        role -> Nullable<Text>,
    }
}

diesel::table! {
    product (id) {
        id -> Integer,
        name -> Text,
        description -> Nullable<Text>,
        price -> Double,
    }
}

diesel::table! {
    promotion (id) {
        id -> Integer,
        name -> Text,
        discount_percentage -> Double,
        start_date -> Timestamp,
        end_date -> Timestamp,
    }
}

diesel::table! {
    supplier (id) {
        id -> Integer,
        name -> Text,
        contact_name -> Nullable<Text>,
        phone -> Nullable<Text>,
    }
}

diesel::table! {
    customer_feedback (id) {
        id -> Integer,
        customer_id -> Integer,
        feedback_date -> Nullable<Timestamp>,
        comments -> Nullable<Text>,
    }
}

diesel::table! {
    department (id) {
        id -> Integer,
        name -> Text,
        manager_id -> Nullable<Integer>,
    }
}

diesel::table! {
    inventory (id) {
        id -> Integer,
        product_id -> Integer,
        supplier_id -> Integer,
        quantity_in_stock -> Integer,
    }
}

diesel::table! {
    #[sql_name = "order"]
    orders (id) {
        id -> Integer,
        order_date -> Nullable<Timestamp>,
        customer_id -> Integer,
        total_amount -> Nullable<Double>,
    }
}

diesel::table! {
    order_detail (id) {
        id -> Integer,
        order_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        unit_price -> Double,
    }
}

diesel::table! {
    order_promotion (id) {
        id -> Integer,
        order_id -> Integer,
        promotion_id -> Integer,
    }
}

diesel::table! {
    shipment (id) {
        id -> Integer,
        order_id -> Integer,
        destination -> Nullable<Text>,
        shipped_date -> Nullable<Timestamp>,
        status -> Nullable<Text>,
    }
}

diesel::joinable!(customer_feedback -> customer (customer_id));
diesel::joinable!(department -> employee (manager_id));
diesel::joinable!(inventory -> product (product_id));
diesel::joinable!(inventory -> supplier (supplier_id));
diesel::joinable!(orders -> customer (customer_id));
diesel::joinable!(order_detail -> orders (order_id));
diesel::joinable!(order_detail -> product (product_id));
diesel::joinable!(order_promotion -> orders (order_id));
diesel::joinable!(order_promotion -> promotion (promotion_id));
diesel::joinable!(shipment -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    customer,
    employee,
    product,
    promotion,
    supplier,
    customer_feedback,
    department,
    inventory,
    orders,
    order_detail,
    order_promotion,
    shipment,
);
