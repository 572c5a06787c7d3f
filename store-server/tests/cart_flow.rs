//! Cart invariants: quantities clamp to stock on add and update.

mod common;

use common::*;
use store_server::db::repository::cart;

#[tokio::test]
async fn test_add_existing_line_increments_and_clamps() {
    let ctx = setup().await;
    let user = seed_user(&ctx.pool, 1, true).await;
    let product = seed_product(&ctx.pool, 10, 10_000.0, None, None, 5, 500).await;

    let qty = cart::add_item(&ctx.pool, user.id, product.id, 3, product.stock)
        .await
        .unwrap();
    assert_eq!(qty, 3);

    // Adding 4 more would exceed stock 5 → clamps to 5
    let qty = cart::add_item(&ctx.pool, user.id, product.id, 4, product.stock)
        .await
        .unwrap();
    assert_eq!(qty, 5);

    // Still a single line
    assert_eq!(cart_count(&ctx.pool, user.id).await, 1);
}

#[tokio::test]
async fn test_lines_join_products_for_totals() {
    let ctx = setup().await;
    let user = seed_user(&ctx.pool, 1, true).await;
    seed_product(&ctx.pool, 10, 10_000.0, Some(9_000.0), None, 20, 400).await;
    seed_cart_line(&ctx.pool, user.id, 10, 3).await;

    let lines = cart::find_lines(&ctx.pool, user.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].subtotal(), 27_000.0);
    assert_eq!(lines[0].total_weight(), 1_200);
}

#[tokio::test]
async fn test_remove_is_owner_scoped() {
    let ctx = setup().await;
    let alice = seed_user(&ctx.pool, 1, true).await;
    let bob = seed_user(&ctx.pool, 2, true).await;
    seed_product(&ctx.pool, 10, 10_000.0, None, None, 5, 500).await;
    seed_cart_line(&ctx.pool, alice.id, 10, 1).await;

    let lines = cart::find_lines(&ctx.pool, alice.id).await.unwrap();
    let item_id = lines[0].item.id;

    // Bob cannot remove Alice's line
    assert!(!cart::remove_item(&ctx.pool, bob.id, item_id).await.unwrap());
    assert!(cart::remove_item(&ctx.pool, alice.id, item_id).await.unwrap());
    assert_eq!(cart_count(&ctx.pool, alice.id).await, 0);
}

#[tokio::test]
async fn test_clear_only_touches_own_cart() {
    let ctx = setup().await;
    let alice = seed_user(&ctx.pool, 1, true).await;
    let bob = seed_user(&ctx.pool, 2, true).await;
    seed_product(&ctx.pool, 10, 10_000.0, None, None, 5, 500).await;
    seed_cart_line(&ctx.pool, alice.id, 10, 1).await;
    seed_cart_line(&ctx.pool, bob.id, 10, 2).await;

    cart::clear(&ctx.pool, alice.id).await.unwrap();
    assert_eq!(cart_count(&ctx.pool, alice.id).await, 0);
    assert_eq!(cart_count(&ctx.pool, bob.id).await, 1);
}
