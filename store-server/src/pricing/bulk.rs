//! Bulk Price Adjustment Runner
//!
//! Applies [`adjust_prices`](super::adjust_prices) to the whole catalog
//! in parallel batches. Each product update is independent; one failure
//! never aborts its siblings, and there is no cross-product atomicity.

use super::adjuster::adjust_prices;
use crate::db::repository::product;
use shared::util::now_millis;
use shared::{AppError, AppResult};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;

/// Products per spawned batch
const BATCH_SIZE: usize = 100;

/// Result of a bulk adjustment run
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BulkAdjustOutcome {
    /// Products whose update succeeded
    pub updated: usize,
    /// Products whose update failed (logged, not retried)
    pub failed: usize,
}

/// Adjust every product's prices by `percentage` (in [-100, 100]).
///
/// Waits for all batches before returning.
pub async fn run_bulk_adjustment(pool: &SqlitePool, percentage: f64) -> AppResult<BulkAdjustOutcome> {
    if !(-100.0..=100.0).contains(&percentage) {
        return Err(AppError::validation(
            "percentage must be between -100 and 100",
        ));
    }

    let products = product::find_all(pool).await.map_err(AppError::from)?;
    let total = products.len();
    let stamped_at = now_millis();

    tracing::info!(total, percentage, "Starting bulk price adjustment");

    let updated = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let mut batches = JoinSet::new();

    for chunk in products.chunks(BATCH_SIZE) {
        let batch: Vec<_> = chunk.to_vec();
        let pool = pool.clone();
        let updated = updated.clone();
        let failed = failed.clone();

        batches.spawn(async move {
            for p in batch {
                let adjusted = adjust_prices(&p, percentage);
                match product::update_prices(
                    &pool,
                    p.id,
                    adjusted.price,
                    adjusted.price_3_items,
                    adjusted.price_5_items,
                    stamped_at,
                )
                .await
                {
                    Ok(()) => {
                        updated.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!(
                            product_id = p.id,
                            old_price = p.price,
                            new_price = adjusted.price,
                            "Adjusted product price"
                        );
                    }
                    Err(e) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(product_id = p.id, error = %e, "Price update failed");
                    }
                }
            }
        });
    }

    // Wait for every batch; a panicked batch only loses its own products
    while let Some(res) = batches.join_next().await {
        if let Err(e) = res {
            tracing::warn!(error = %e, "Price adjustment batch panicked");
        }
    }

    let outcome = BulkAdjustOutcome {
        updated: updated.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    };
    tracing::info!(updated = outcome.updated, failed = outcome.failed, "Bulk price adjustment done");
    Ok(outcome)
}
