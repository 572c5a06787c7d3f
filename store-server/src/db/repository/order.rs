//! Order Repository
//!
//! Orders are soft-deleted only; every read filters `deleted_at IS NULL`.
//! Creation happens exclusively inside the checkout transaction.

use super::RepoResult;
use shared::models::{Order, OrderItem, OrderStatus, PaymentStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_number, user_id, total_price, shipping_cost, courier, courier_service, tracking_number, status, shipping_method, shipping_address, payment_status, notes, created_at, updated_at FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, product_id, product_name, quantity, price_at_purchase, created_at FROM order_items";

/// Insert the order row inside the checkout transaction
pub async fn insert_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, total_price, shipping_cost, courier, courier_service, tracking_number, status, shipping_method, shipping_address, payment_status, notes, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.user_id)
    .bind(order.total_price)
    .bind(order.shipping_cost)
    .bind(&order.courier)
    .bind(&order.courier_service)
    .bind(&order.tracking_number)
    .bind(order.status)
    .bind(order.shipping_method)
    .bind(&order.shipping_address)
    .bind(order.payment_status)
    .bind(&order.notes)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Insert one order line inside the checkout transaction
pub async fn insert_item_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    item: &OrderItem,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, product_id, product_name, quantity, price_at_purchase, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.price_at_purchase)
    .bind(item.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Find an order by id. `user_id = None` skips the ownership filter
/// (admin/subadmin access).
pub async fn find_by_id(
    pool: &SqlitePool,
    id: i64,
    user_id: Option<i64>,
) -> RepoResult<Option<Order>> {
    let order = match user_id {
        Some(uid) => {
            let sql = format!("{ORDER_SELECT} WHERE id = ? AND user_id = ? AND deleted_at IS NULL");
            sqlx::query_as::<_, Order>(&sql)
                .bind(id)
                .bind(uid)
                .fetch_optional(pool)
                .await?
        }
        None => {
            let sql = format!("{ORDER_SELECT} WHERE id = ? AND deleted_at IS NULL");
            sqlx::query_as::<_, Order>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    Ok(order)
}

/// Load order lines for one order
pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY created_at");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// User's order history, newest first
pub async fn find_by_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE user_id = ? AND deleted_at IS NULL ORDER BY created_at DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE user_id = ? AND deleted_at IS NULL",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Admin listing filters
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Matches order_number or shipping_address (substring)
    pub search: Option<String>,
}

fn filter_clauses(filter: &OrderFilter) -> String {
    let mut sql = String::from(" WHERE deleted_at IS NULL");
    if filter.status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if filter.payment_status.is_some() {
        sql.push_str(" AND payment_status = ?");
    }
    if filter.search.is_some() {
        sql.push_str(" AND (order_number LIKE ? OR shipping_address LIKE ?)");
    }
    sql
}

/// All orders matching the admin filters, newest first
pub async fn find_all(
    pool: &SqlitePool,
    filter: &OrderFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT}{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        filter_clauses(filter)
    );
    let mut query = sqlx::query_as::<_, Order>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(payment_status) = filter.payment_status {
        query = query.bind(payment_status);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }
    let rows = query.bind(limit).bind(offset).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count_all(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM orders{}", filter_clauses(filter));
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(payment_status) = filter.payment_status {
        query = query.bind(payment_status);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }
    let count = query.fetch_one(pool).await?;
    Ok(count)
}

/// Admin manual status edit: overwrite any subset of status,
/// payment_status and tracking_number. No transition validation beyond
/// the typed enums.
pub async fn update_status(
    pool: &SqlitePool,
    order_id: i64,
    status: Option<OrderStatus>,
    payment_status: Option<PaymentStatus>,
    tracking_number: Option<String>,
) -> RepoResult<u64> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET status = COALESCE(?1, status), payment_status = COALESCE(?2, payment_status), tracking_number = COALESCE(?3, tracking_number), updated_at = ?4 WHERE id = ?5 AND deleted_at IS NULL",
    )
    .bind(status)
    .bind(payment_status)
    .bind(tracking_number)
    .bind(now)
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Force the payment status (proof upload / verification side effects)
pub async fn set_payment_status(
    pool: &SqlitePool,
    order_id: i64,
    payment_status: PaymentStatus,
) -> RepoResult<u64> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET payment_status = ?1, updated_at = ?2 WHERE id = ?3 AND deleted_at IS NULL",
    )
    .bind(payment_status)
    .bind(now)
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Verified-proof side effect: payment verified AND order forced to
/// processing, whatever its current status.
pub async fn mark_payment_verified(pool: &SqlitePool, order_id: i64) -> RepoResult<u64> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET payment_status = ?1, status = ?2, updated_at = ?3 WHERE id = ?4 AND deleted_at IS NULL",
    )
    .bind(PaymentStatus::Verified)
    .bind(OrderStatus::Processing)
    .bind(now)
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
