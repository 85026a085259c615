//! Builders for sample orders used across tests.

use chrono::{TimeZone, Utc};

use crate::domain::id::OrderUid;
use crate::domain::order::{Delivery, Item, Order, Payment};

/// The reference order payload, exactly as published on the bus.
pub const MODEL_ORDER_JSON: &str = r#"{
  "order_uid": "b563feb7b2b84b6test",
  "track_number": "WBILMTESTTRACK",
  "entry": "WBIL",
  "delivery": {
    "name": "Test Testov",
    "phone": "+9720000000",
    "zip": "2639809",
    "city": "Kiryat Mozkin",
    "address": "Ploshad Mira 15",
    "region": "Kraiot",
    "email": "test@gmail.com"
  },
  "payment": {
    "transaction": "b563feb7b2b84b6test",
    "request_id": "",
    "currency": "USD",
    "provider": "wbpay",
    "amount": 1817,
    "payment_dt": 1637907727,
    "bank": "alpha",
    "delivery_cost": 1500,
    "goods_total": 317,
    "custom_fee": 0
  },
  "items": [
    {
      "chrt_id": 9934930,
      "track_number": "WBILMTESTTRACK",
      "price": 453,
      "rid": "ab4219087a764ae0btest",
      "name": "Mascaras",
      "sale": 30,
      "size": "0",
      "total_price": 317,
      "nm_id": 2389212,
      "brand": "Vivienne Sabo",
      "status": 202
    }
  ],
  "locale": "en",
  "internal_signature": "",
  "customer_id": "test",
  "delivery_service": "meest",
  "shardkey": "9",
  "sm_id": 99,
  "date_created": "2021-11-26T06:22:19Z",
  "oof_shard": "1"
}"#;

/// UID of [`MODEL_ORDER_JSON`].
pub const MODEL_ORDER_UID: &str = "b563feb7b2b84b6test";

/// The reference order as a value.
pub fn model_order() -> Order {
    let mut order = order_with_uid(MODEL_ORDER_UID);
    order.items[0].rid = "ab4219087a764ae0btest".into();
    order
}

/// A valid single-item order with the given UID.
pub fn order_with_uid(uid: &str) -> Order {
    Order {
        order_uid: OrderUid::new(uid),
        track_number: "WBILMTESTTRACK".into(),
        entry: "WBIL".into(),
        delivery: delivery(),
        payment: Payment {
            transaction: uid.into(),
            request_id: String::new(),
            currency: "USD".into(),
            provider: "wbpay".into(),
            amount: 1817,
            payment_dt: 1_637_907_727,
            bank: "alpha".into(),
            delivery_cost: 1500,
            goods_total: 317,
            custom_fee: 0,
        },
        items: vec![item(9_934_930)],
        locale: "en".into(),
        internal_signature: String::new(),
        customer_id: "test".into(),
        delivery_service: "meest".into(),
        shardkey: "9".into(),
        sm_id: 99,
        date_created: Utc.with_ymd_and_hms(2021, 11, 26, 6, 22, 19).unwrap(),
        oof_shard: "1".into(),
    }
}

/// A valid order carrying `n` distinct items.
pub fn order_with_items(uid: &str, n: usize) -> Order {
    let mut order = order_with_uid(uid);
    order.items = (0..n as i64).map(|i| item(1000 + i)).collect();
    order
}

/// The reference delivery.
pub fn delivery() -> Delivery {
    Delivery {
        name: "Test Testov".into(),
        phone: "+9720000000".into(),
        zip: "2639809".into(),
        city: "Kiryat Mozkin".into(),
        address: "Ploshad Mira 15".into(),
        region: "Kraiot".into(),
        email: "test@gmail.com".into(),
    }
}

/// A valid item with the given chart id.
pub fn item(chrt_id: i64) -> Item {
    Item {
        chrt_id,
        track_number: "WBILMTESTTRACK".into(),
        price: 453,
        rid: format!("ab4219087a764ae0b{chrt_id}"),
        name: "Mascaras".into(),
        sale: 30,
        size: "0".into(),
        total_price: 317,
        nm_id: 2_389_212,
        brand: "Vivienne Sabo".into(),
        status: 202,
    }
}

/// Encode an order as a bus payload.
pub fn payload(order: &Order) -> Vec<u8> {
    serde_json::to_vec(order).unwrap()
}
