//! SQLite implementation of [`OrderRepository`].
//!
//! An order is written as one delivery row, one payment row, one row per
//! item and finally the order header referencing them, all inside a single
//! transaction. Reads join the header with its delivery and payment and
//! resolve items from the stored id list, preserving its order.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::SqliteConnection;
use tracing::{debug, info};

use super::database::connection::DbPool;
use super::database::model::{
    DeliveryRow, ItemRow, NewDeliveryRow, NewItemRow, NewOrderRow, NewPaymentRow, OrderRow,
    PaymentRow,
};
use super::database::schema::{deliveries, items, orders, payments};
use super::transaction::{SqliteStore, TxContext};
use crate::domain::id::OrderUid;
use crate::domain::order::{Item, Order};
use crate::error::{Error, Result};
use crate::port::outbound::store::OrderRepository;

/// Upper bound on ids bound into one `IN (...)` clause.
const ITEM_BATCH: usize = 500;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

#[derive(QueryableByName)]
struct InsertedUid {
    #[diesel(sql_type = Text)]
    order_uid: String,
}

/// Order repository backed by SQLite via Diesel.
#[derive(Clone)]
pub struct SqliteOrderRepository {
    store: SqliteStore,
}

impl SqliteOrderRepository {
    /// Create a repository over a migrated pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            store: SqliteStore::new(pool),
        }
    }

    /// The store used for all work.
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn add_order(&self, order: &Order) -> Result<()> {
        let order = order.clone();
        let uid = order.order_uid.clone();
        let items = order.item_count();

        self.store.transaction(move |tx| insert_order_graph(tx, &order)).await?;

        info!(order_uid = %uid, items, "Order persisted");
        Ok(())
    }

    async fn get_order_by_id(&self, order_uid: &OrderUid) -> Result<Order> {
        let uid = order_uid.clone();
        self.store.run(move |conn| load_order(conn, &uid)).await
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        let orders = self.store.run(load_all_orders).await?;
        debug!(count = orders.len(), "Loaded all orders");
        Ok(orders)
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

fn insert_order_graph(tx: &mut TxContext<'_>, order: &Order) -> Result<()> {
    let delivery_id = insert_delivery(tx.conn(), NewDeliveryRow::from(&order.delivery))?;
    tx.checkpoint()?;

    let payment_id = insert_payment(tx.conn(), NewPaymentRow::from(&order.payment))?;
    tx.checkpoint()?;

    let mut item_ids = Vec::with_capacity(order.items.len());
    for item in &order.items {
        item_ids.push(insert_item(tx.conn(), NewItemRow::from(item))?);
        tx.checkpoint()?;
    }

    let row = NewOrderRow::new(order, delivery_id, payment_id, &item_ids)?;
    insert_header(tx.conn(), &row)
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64> {
    let row = diesel::sql_query("SELECT last_insert_rowid() AS id").get_result::<LastInsertRowId>(conn)?;
    Ok(row.id)
}

fn insert_delivery(conn: &mut SqliteConnection, row: NewDeliveryRow<'_>) -> Result<i64> {
    diesel::insert_into(deliveries::table).values(&row).execute(conn)?;
    last_insert_rowid(conn)
}

fn insert_payment(conn: &mut SqliteConnection, row: NewPaymentRow<'_>) -> Result<i64> {
    diesel::insert_into(payments::table).values(&row).execute(conn)?;
    last_insert_rowid(conn)
}

fn insert_item(conn: &mut SqliteConnection, row: NewItemRow<'_>) -> Result<i64> {
    diesel::insert_into(items::table).values(&row).execute(conn)?;
    last_insert_rowid(conn)
}

/// Insert the header and confirm the stored key is the one supplied.
fn insert_header(conn: &mut SqliteConnection, row: &NewOrderRow<'_>) -> Result<()> {
    diesel::insert_into(orders::table).values(row).execute(conn)?;

    let stored = diesel::sql_query("SELECT order_uid FROM orders WHERE rowid = last_insert_rowid()")
        .get_result::<InsertedUid>(conn)?;
    if stored.order_uid != row.order_uid {
        return Err(Error::Integrity(format!(
            "stored order_uid {} does not match supplied {}",
            stored.order_uid, row.order_uid
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

type OrderGraphRow = (OrderRow, DeliveryRow, PaymentRow);

fn load_order(conn: &mut SqliteConnection, uid: &OrderUid) -> Result<Order> {
    let found = orders::table
        .inner_join(deliveries::table)
        .inner_join(payments::table)
        .filter(orders::order_uid.eq(uid.as_str()))
        .select((
            OrderRow::as_select(),
            DeliveryRow::as_select(),
            PaymentRow::as_select(),
        ))
        .first::<OrderGraphRow>(conn)
        .optional()?;

    let Some((header, delivery, payment)) = found else {
        return Err(Error::NotFound(uid.clone()));
    };

    let ids = header.item_ids()?;
    let mut resolved = fetch_items(conn, &ids)?;
    let items = order_items(&header.order_uid, &ids, &mut resolved)?;
    header.into_order(delivery, payment, items)
}

fn load_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>> {
    let rows = orders::table
        .inner_join(deliveries::table)
        .inner_join(payments::table)
        .order(orders::order_uid.asc())
        .select((
            OrderRow::as_select(),
            DeliveryRow::as_select(),
            PaymentRow::as_select(),
        ))
        .load::<OrderGraphRow>(conn)?;

    let mut headers = Vec::with_capacity(rows.len());
    let mut all_ids = Vec::new();
    for (header, delivery, payment) in rows {
        let ids = header.item_ids()?;
        all_ids.extend_from_slice(&ids);
        headers.push((header, delivery, payment, ids));
    }

    let mut resolved = fetch_items(conn, &all_ids)?;
    headers
        .into_iter()
        .map(|(header, delivery, payment, ids)| {
            let items = order_items(&header.order_uid, &ids, &mut resolved)?;
            header.into_order(delivery, payment, items)
        })
        .collect()
}

fn fetch_items(conn: &mut SqliteConnection, ids: &[i64]) -> Result<HashMap<i64, ItemRow>> {
    let mut found = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(ITEM_BATCH) {
        let rows = items::table
            .filter(items::item_id.eq_any(chunk))
            .select(ItemRow::as_select())
            .load::<ItemRow>(conn)?;
        found.extend(rows.into_iter().map(|row| (row.item_id, row)));
    }
    Ok(found)
}

/// Pick the order's items out of the fetched rows, in stored order.
fn order_items(order_uid: &str, ids: &[i64], rows: &mut HashMap<i64, ItemRow>) -> Result<Vec<Item>> {
    ids.iter()
        .map(|id| {
            rows.remove(id).map(Item::from).ok_or_else(|| {
                Error::Integrity(format!("order {order_uid} references missing item {id}"))
            })
        })
        .collect()
}
