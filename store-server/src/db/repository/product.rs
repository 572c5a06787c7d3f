//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::Product;
use shared::util::now_millis;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, price, price_3_items, price_5_items, stock, weight, last_price_update, created_at, updated_at FROM products";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE deleted_at IS NULL ORDER BY name");
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ? AND deleted_at IS NULL");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Conditionally decrement stock inside the checkout transaction.
///
/// The `stock >= qty` guard serializes concurrent checkouts on the same
/// product: whichever transaction commits second sees the decremented
/// value and affects zero rows. Returns `false` when stock is
/// insufficient; the caller must roll back.
pub async fn decrement_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    product_id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE products SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND deleted_at IS NULL AND stock >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(product_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Overwrite the price columns for one product (bulk price adjustment).
///
/// Each call is independent by design; the bulk operation has no
/// cross-product atomicity guarantee.
pub async fn update_prices(
    pool: &SqlitePool,
    product_id: i64,
    price: f64,
    price_3_items: Option<f64>,
    price_5_items: Option<f64>,
    stamped_at: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE products SET price = ?1, price_3_items = ?2, price_5_items = ?3, last_price_update = ?4, updated_at = ?4 WHERE id = ?5 AND deleted_at IS NULL",
    )
    .bind(price)
    .bind(price_3_items)
    .bind(price_5_items)
    .bind(stamped_at)
    .bind(product_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {product_id} not found"
        )));
    }
    Ok(())
}

/// Test/seed helper: insert a product row
pub async fn insert(pool: &SqlitePool, product: &Product) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO products (id, name, price, price_3_items, price_5_items, stock, weight, last_price_update, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(product.price_3_items)
    .bind(product.price_5_items)
    .bind(product.stock)
    .bind(product.weight)
    .bind(product.last_price_update)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}
