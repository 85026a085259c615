//! Database model types for Diesel ORM.
//!
//! Queryable rows own their data; insertable rows borrow from the domain
//! order being persisted.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;

use super::schema::{deliveries, items, orders, payments};
use crate::domain::id::OrderUid;
use crate::domain::order::{Delivery, Item, Order, Payment};
use crate::error::{Error, Result};

/// Database row for a delivery (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeliveryRow {
    pub delivery_id: i64,
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

/// Database row for a delivery (insertable).
#[derive(Insertable, Debug)]
#[diesel(table_name = deliveries)]
pub struct NewDeliveryRow<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub zip: &'a str,
    pub city: &'a str,
    pub address: &'a str,
    pub region: &'a str,
    pub email: &'a str,
}

/// Database row for a payment (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentRow {
    pub payment_id: i64,
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: i64,
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: i64,
    pub goods_total: i64,
    pub custom_fee: i64,
}

/// Database row for a payment (insertable).
#[derive(Insertable, Debug)]
#[diesel(table_name = payments)]
pub struct NewPaymentRow<'a> {
    pub transaction: &'a str,
    pub request_id: &'a str,
    pub currency: &'a str,
    pub provider: &'a str,
    pub amount: i64,
    pub payment_dt: i64,
    pub bank: &'a str,
    pub delivery_cost: i64,
    pub goods_total: i64,
    pub custom_fee: i64,
}

/// Database row for an item (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemRow {
    pub item_id: i64,
    pub chrt_id: i64,
    pub track_number: String,
    pub price: i64,
    pub rid: String,
    pub name: String,
    pub sale: i32,
    pub size: String,
    pub total_price: i64,
    pub nm_id: i64,
    pub brand: String,
    pub status: i32,
}

/// Database row for an item (insertable).
#[derive(Insertable, Debug)]
#[diesel(table_name = items)]
pub struct NewItemRow<'a> {
    pub chrt_id: i64,
    pub track_number: &'a str,
    pub price: i64,
    pub rid: &'a str,
    pub name: &'a str,
    pub sale: i32,
    pub size: &'a str,
    pub total_price: i64,
    pub nm_id: i64,
    pub brand: &'a str,
    pub status: i32,
}

/// Database row for an order header (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub order_uid: String,
    pub track_number: String,
    pub entry: String,
    pub delivery_id: i64,
    pub payment_id: i64,
    pub items_ids: String,
    pub locale: String,
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i32,
    pub date_created: String,
    pub oof_shard: String,
}

/// Database row for an order header (insertable).
#[derive(Insertable, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub order_uid: &'a str,
    pub track_number: &'a str,
    pub entry: &'a str,
    pub delivery_id: i64,
    pub payment_id: i64,
    pub items_ids: String,
    pub locale: &'a str,
    pub internal_signature: &'a str,
    pub customer_id: &'a str,
    pub delivery_service: &'a str,
    pub shardkey: &'a str,
    pub sm_id: i32,
    pub date_created: String,
    pub oof_shard: &'a str,
}

// ---------------------------------------------------------------------------
// Domain -> row
// ---------------------------------------------------------------------------

impl<'a> From<&'a Delivery> for NewDeliveryRow<'a> {
    fn from(d: &'a Delivery) -> Self {
        Self {
            name: &d.name,
            phone: &d.phone,
            zip: &d.zip,
            city: &d.city,
            address: &d.address,
            region: &d.region,
            email: &d.email,
        }
    }
}

impl<'a> From<&'a Payment> for NewPaymentRow<'a> {
    fn from(p: &'a Payment) -> Self {
        Self {
            transaction: &p.transaction,
            request_id: &p.request_id,
            currency: &p.currency,
            provider: &p.provider,
            amount: p.amount,
            payment_dt: p.payment_dt,
            bank: &p.bank,
            delivery_cost: p.delivery_cost,
            goods_total: p.goods_total,
            custom_fee: p.custom_fee,
        }
    }
}

impl<'a> From<&'a Item> for NewItemRow<'a> {
    fn from(i: &'a Item) -> Self {
        Self {
            chrt_id: i.chrt_id,
            track_number: &i.track_number,
            price: i.price,
            rid: &i.rid,
            name: &i.name,
            sale: i.sale,
            size: &i.size,
            total_price: i.total_price,
            nm_id: i.nm_id,
            brand: &i.brand,
            status: i.status,
        }
    }
}

impl<'a> NewOrderRow<'a> {
    /// Build the header row once the owned parts have been assigned ids.
    ///
    /// # Errors
    /// Returns an error if the item id list cannot be encoded.
    pub fn new(order: &'a Order, delivery_id: i64, payment_id: i64, item_ids: &[i64]) -> Result<Self> {
        Ok(Self {
            order_uid: order.order_uid.as_str(),
            track_number: &order.track_number,
            entry: &order.entry,
            delivery_id,
            payment_id,
            items_ids: encode_item_ids(item_ids)?,
            locale: &order.locale,
            internal_signature: &order.internal_signature,
            customer_id: &order.customer_id,
            delivery_service: &order.delivery_service,
            shardkey: &order.shardkey,
            sm_id: order.sm_id,
            date_created: encode_timestamp(&order.date_created),
            oof_shard: &order.oof_shard,
        })
    }
}

// ---------------------------------------------------------------------------
// Row -> domain
// ---------------------------------------------------------------------------

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Self {
            name: row.name,
            phone: row.phone,
            zip: row.zip,
            city: row.city,
            address: row.address,
            region: row.region,
            email: row.email,
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            transaction: row.transaction,
            request_id: row.request_id,
            currency: row.currency,
            provider: row.provider,
            amount: row.amount,
            payment_dt: row.payment_dt,
            bank: row.bank,
            delivery_cost: row.delivery_cost,
            goods_total: row.goods_total,
            custom_fee: row.custom_fee,
        }
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            chrt_id: row.chrt_id,
            track_number: row.track_number,
            price: row.price,
            rid: row.rid,
            name: row.name,
            sale: row.sale,
            size: row.size,
            total_price: row.total_price,
            nm_id: row.nm_id,
            brand: row.brand,
            status: row.status,
        }
    }
}

impl OrderRow {
    /// Decode the stored item id list.
    ///
    /// # Errors
    /// Returns [`Error::Integrity`] if the column is not a JSON id array.
    pub fn item_ids(&self) -> Result<Vec<i64>> {
        serde_json::from_str(&self.items_ids).map_err(|e| {
            Error::Integrity(format!(
                "order {} has malformed items_ids: {e}",
                self.order_uid
            ))
        })
    }

    /// Assemble the domain order from the header and its resolved parts.
    ///
    /// # Errors
    /// Returns [`Error::Integrity`] if the stored timestamp is malformed.
    pub fn into_order(self, delivery: DeliveryRow, payment: PaymentRow, items: Vec<Item>) -> Result<Order> {
        let date_created = decode_timestamp(&self.order_uid, &self.date_created)?;
        Ok(Order {
            order_uid: OrderUid::new(self.order_uid),
            track_number: self.track_number,
            entry: self.entry,
            delivery: delivery.into(),
            payment: payment.into(),
            items,
            locale: self.locale,
            internal_signature: self.internal_signature,
            customer_id: self.customer_id,
            delivery_service: self.delivery_service,
            shardkey: self.shardkey,
            sm_id: self.sm_id,
            date_created,
            oof_shard: self.oof_shard,
        })
    }
}

fn encode_item_ids(ids: &[i64]) -> Result<String> {
    Ok(serde_json::to_string(ids)?)
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn decode_timestamp(order_uid: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Integrity(format!("order {order_uid} has malformed date_created: {e}")))
}
