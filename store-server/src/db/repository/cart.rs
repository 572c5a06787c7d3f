//! Cart Repository
//!
//! Cart lines are unique per (user, product). Quantities are clamped to
//! the product's current stock at mutation time; the checkout
//! transaction re-validates against stock anyway.

use super::{RepoError, RepoResult};
use shared::models::{CartItem, CartLine, Product};
use shared::util::{now_millis, snowflake_id};
use sqlx::{FromRow, SqlitePool};

/// Flat row produced by the cart ⋈ product join
#[derive(Debug, FromRow)]
struct CartLineRow {
    // cart_items
    id: i64,
    user_id: i64,
    product_id: i64,
    quantity: i64,
    created_at: i64,
    updated_at: i64,
    // products
    product_name: String,
    price: f64,
    price_3_items: Option<f64>,
    price_5_items: Option<f64>,
    stock: i64,
    weight: i64,
    last_price_update: Option<i64>,
    product_created_at: i64,
    product_updated_at: i64,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            item: CartItem {
                id: row.id,
                user_id: row.user_id,
                product_id: row.product_id,
                quantity: row.quantity,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            product: Product {
                id: row.product_id,
                name: row.product_name,
                price: row.price,
                price_3_items: row.price_3_items,
                price_5_items: row.price_5_items,
                stock: row.stock,
                weight: row.weight,
                last_price_update: row.last_price_update,
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
            },
        }
    }
}

const CART_LINE_SELECT: &str = "SELECT c.id, c.user_id, c.product_id, c.quantity, c.created_at, c.updated_at, p.name AS product_name, p.price, p.price_3_items, p.price_5_items, p.stock, p.weight, p.last_price_update, p.created_at AS product_created_at, p.updated_at AS product_updated_at FROM cart_items c JOIN products p ON p.id = c.product_id AND p.deleted_at IS NULL";

/// All cart lines for a user, with product data
pub async fn find_lines(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartLine>> {
    let sql = format!("{CART_LINE_SELECT} WHERE c.user_id = ? ORDER BY c.created_at");
    let rows = sqlx::query_as::<_, CartLineRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(CartLine::from).collect())
}

/// Same as [`find_lines`] but executed inside the checkout transaction,
/// so the prices and stock read here are the ones the order snapshots.
pub async fn find_lines_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: i64,
) -> RepoResult<Vec<CartLine>> {
    let sql = format!("{CART_LINE_SELECT} WHERE c.user_id = ? ORDER BY c.created_at");
    let rows = sqlx::query_as::<_, CartLineRow>(&sql)
        .bind(user_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(CartLine::from).collect())
}

/// Add a product to the cart.
///
/// An existing line has its quantity increased, capped at current stock.
/// Returns the resulting quantity.
pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    product_id: i64,
    quantity: i64,
    stock: i64,
) -> RepoResult<i64> {
    let now = now_millis();
    let existing = sqlx::query_as::<_, CartItem>(
        "SELECT id, user_id, product_id, quantity, created_at, updated_at FROM cart_items WHERE user_id = ? AND product_id = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(item) => {
            let new_qty = (item.quantity + quantity).min(stock);
            sqlx::query("UPDATE cart_items SET quantity = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(new_qty)
                .bind(now)
                .bind(item.id)
                .execute(pool)
                .await?;
            Ok(new_qty)
        }
        None => {
            let id = snowflake_id();
            let qty = quantity.min(stock);
            sqlx::query(
                "INSERT INTO cart_items (id, user_id, product_id, quantity, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            )
            .bind(id)
            .bind(user_id)
            .bind(product_id)
            .bind(qty)
            .bind(now)
            .execute(pool)
            .await?;
            Ok(qty)
        }
    }
}

/// Set a cart line's quantity (caller has already validated against stock)
pub async fn update_quantity(
    pool: &SqlitePool,
    user_id: i64,
    item_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE cart_items SET quantity = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
    )
    .bind(quantity)
    .bind(now)
    .bind(item_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Cart item {item_id} not found")));
    }
    Ok(())
}

/// A single cart line with product, scoped to its owner
pub async fn find_line(
    pool: &SqlitePool,
    user_id: i64,
    item_id: i64,
) -> RepoResult<Option<CartLine>> {
    let sql = format!("{CART_LINE_SELECT} WHERE c.id = ? AND c.user_id = ?");
    let row = sqlx::query_as::<_, CartLineRow>(&sql)
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(CartLine::from))
}

pub async fn remove_item(pool: &SqlitePool, user_id: i64, item_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM cart_items WHERE id = ? AND user_id = ?")
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn clear(pool: &SqlitePool, user_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Clear the cart inside the checkout transaction
pub async fn clear_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: i64,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn count(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
