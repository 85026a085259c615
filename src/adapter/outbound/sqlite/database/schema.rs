// Maintained by hand. INTEGER surrogate keys are mapped to `BigInt` to match the i64 ids.

diesel::table! {
    deliveries (delivery_id) {
        delivery_id -> BigInt,
        name -> Text,
        phone -> Text,
        zip -> Text,
        city -> Text,
        address -> Text,
        region -> Text,
        email -> Text,
    }
}

diesel::table! {
    items (item_id) {
        item_id -> BigInt,
        chrt_id -> BigInt,
        track_number -> Text,
        price -> BigInt,
        rid -> Text,
        name -> Text,
        sale -> Integer,
        size -> Text,
        total_price -> BigInt,
        nm_id -> BigInt,
        brand -> Text,
        status -> Integer,
    }
}

diesel::table! {
    orders (order_uid) {
        order_uid -> Text,
        track_number -> Text,
        entry -> Text,
        delivery_id -> BigInt,
        payment_id -> BigInt,
        items_ids -> Text,
        locale -> Text,
        internal_signature -> Text,
        customer_id -> Text,
        delivery_service -> Text,
        shardkey -> Text,
        sm_id -> Integer,
        date_created -> Text,
        oof_shard -> Text,
    }
}

diesel::table! {
    payments (payment_id) {
        payment_id -> BigInt,
        transaction -> Text,
        request_id -> Text,
        currency -> Text,
        provider -> Text,
        amount -> BigInt,
        payment_dt -> BigInt,
        bank -> Text,
        delivery_cost -> BigInt,
        goods_total -> BigInt,
        custom_fee -> BigInt,
    }
}

diesel::joinable!(orders -> deliveries (delivery_id));
diesel::joinable!(orders -> payments (payment_id));

diesel::allow_tables_to_appear_in_same_query!(deliveries, items, orders, payments,);
