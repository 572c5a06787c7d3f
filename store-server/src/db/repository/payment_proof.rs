//! Payment Proof Repository

use super::{RepoError, RepoResult};
use shared::models::{PaymentProof, ProofStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const PROOF_SELECT: &str = "SELECT id, order_id, image_path, status, admin_notes, created_at, updated_at FROM payment_proofs";

/// Create a proof record in `pending`
pub async fn create(pool: &SqlitePool, order_id: i64, image_path: &str) -> RepoResult<PaymentProof> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO payment_proofs (id, order_id, image_path, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(order_id)
    .bind(image_path)
    .bind(ProofStatus::Pending)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, order_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment proof".into()))
}

/// Find one proof scoped to its order
pub async fn find_by_id(
    pool: &SqlitePool,
    order_id: i64,
    proof_id: i64,
) -> RepoResult<Option<PaymentProof>> {
    let sql = format!("{PROOF_SELECT} WHERE id = ? AND order_id = ? AND deleted_at IS NULL");
    let row = sqlx::query_as::<_, PaymentProof>(&sql)
        .bind(proof_id)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All proofs for one order, oldest first
pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<PaymentProof>> {
    let sql =
        format!("{PROOF_SELECT} WHERE order_id = ? AND deleted_at IS NULL ORDER BY created_at, id");
    let rows = sqlx::query_as::<_, PaymentProof>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Record the admin decision on one proof. Sibling proofs are untouched.
pub async fn set_status(
    pool: &SqlitePool,
    order_id: i64,
    proof_id: i64,
    status: ProofStatus,
    admin_notes: Option<String>,
) -> RepoResult<u64> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE payment_proofs SET status = ?1, admin_notes = COALESCE(?2, admin_notes), updated_at = ?3 WHERE id = ?4 AND order_id = ?5 AND deleted_at IS NULL",
    )
    .bind(status)
    .bind(admin_notes)
    .bind(now)
    .bind(proof_id)
    .bind(order_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
