//! Bulk price adjustment: batching, rounding, tier clamping and the
//! monotonicity invariant across a whole catalog.

mod common;

use common::*;
use shared::ErrorCode;
use store_server::db::repository::product;
use store_server::pricing::run_bulk_adjustment;

#[tokio::test]
async fn test_bulk_adjustment_across_batches() {
    let ctx = setup().await;
    // 250 products → three parallel batches of 100/100/50
    for i in 0..250 {
        let base = 10_000.0 + (i as f64) * 100.0;
        seed_product(
            &ctx.pool,
            1_000 + i,
            base,
            Some(base * 0.9),
            Some(base * 0.8),
            10,
            500,
        )
        .await;
    }

    let outcome = run_bulk_adjustment(&ctx.pool, 10.0).await.unwrap();
    assert_eq!(outcome.updated, 250);
    assert_eq!(outcome.failed, 0);

    let products = product::find_all(&ctx.pool).await.unwrap();
    assert_eq!(products.len(), 250);
    for p in &products {
        // Rounded up to the 500 unit
        assert_eq!(p.price % 500.0, 0.0, "price not rounded: {}", p.price);
        // Ladder stays strictly monotonic
        let p3 = p.price_3_items.expect("tier 3 kept");
        let p5 = p.price_5_items.expect("tier 5 kept");
        assert!(p5 < p3 && p3 < p.price, "ladder violated for {}", p.name);
        // Adjustment stamp recorded
        assert!(p.last_price_update.is_some());
    }
}

#[tokio::test]
async fn test_bulk_adjustment_concrete_values() {
    let ctx = setup().await;
    seed_product(&ctx.pool, 1, 10_000.0, Some(9_000.0), Some(8_000.0), 10, 500).await;

    run_bulk_adjustment(&ctx.pool, 10.0).await.unwrap();

    let p = product::find_by_id(&ctx.pool, 1).await.unwrap().unwrap();
    assert_eq!(p.price, 11_000.0);
    assert_eq!(p.price_3_items, Some(10_000.0)); // 9900 rounded up
    assert_eq!(p.price_5_items, Some(9_000.0)); // 8800 rounded up
}

#[tokio::test]
async fn test_bulk_adjustment_rejects_out_of_range() {
    let ctx = setup().await;
    let err = run_bulk_adjustment(&ctx.pool, 150.0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_products_without_tiers_keep_none() {
    let ctx = setup().await;
    seed_product(&ctx.pool, 1, 10_000.0, None, None, 10, 500).await;

    run_bulk_adjustment(&ctx.pool, -10.0).await.unwrap();

    let p = product::find_by_id(&ctx.pool, 1).await.unwrap().unwrap();
    assert_eq!(p.price, 9_000.0);
    assert_eq!(p.price_3_items, None);
    assert_eq!(p.price_5_items, None);
}
