//! Payment proof state machine tests: upload, verification, rejection,
//! re-upload, and the independence of sibling proofs.

mod common;

use common::*;
use shared::ErrorCode;
use shared::models::{OrderStatus, PaymentStatus, ProofDecision, ProofStatus, ShippingMethod};
use store_server::checkout::PlaceOrder;
use store_server::db::repository::{order, payment_proof};

async fn place_pickup_order(ctx: &TestCtx, user_id: i64) -> i64 {
    let user = seed_user(&ctx.pool, user_id, true).await;
    seed_product(&ctx.pool, 100 + user_id, 10_000.0, None, None, 50, 500).await;
    seed_cart_line(&ctx.pool, user.id, 100 + user_id, 1).await;
    let receipt = ctx
        .engine
        .place_order(
            &user,
            &PlaceOrder {
                shipping_method: ShippingMethod::Pickup,
                courier: None,
                courier_service: None,
                shipping_cost: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    receipt.order_id
}

#[tokio::test]
async fn test_upload_creates_pending_proof_and_marks_uploaded() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;

    let proof = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();
    assert_eq!(proof.status, ProofStatus::Pending);

    let order_row = order::find_by_id(&ctx.pool, order_id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_row.payment_status, PaymentStatus::Uploaded);
    // Order status does not move on upload
    assert_eq!(order_row.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_upload_scoped_to_owner() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;
    seed_user(&ctx.pool, 2, true).await;

    let err = ctx
        .engine
        .upload_proof(2, order_id, "proofs/b.jpg")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn test_upload_after_verification_conflicts() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;

    let proof = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();
    ctx.engine
        .verify_proof(order_id, proof.id, ProofDecision::Verified, None)
        .await
        .unwrap();

    let err = ctx
        .engine
        .upload_proof(1, order_id, "proofs/b.jpg")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentAlreadyVerified);

    // No new proof row was created
    let proofs = payment_proof::find_by_order(&ctx.pool, order_id).await.unwrap();
    assert_eq!(proofs.len(), 1);
}

/// Verification forces payment → verified AND order → processing,
/// regardless of the order's current status.
#[tokio::test]
async fn test_verify_forces_processing() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;
    let proof = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();

    // Admin had manually moved the order along already
    order::update_status(&ctx.pool, order_id, Some(OrderStatus::Shipped), None, None)
        .await
        .unwrap();

    ctx.engine
        .verify_proof(order_id, proof.id, ProofDecision::Verified, Some("ok".into()))
        .await
        .unwrap();

    let order_row = order::find_by_id(&ctx.pool, order_id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_row.payment_status, PaymentStatus::Verified);
    assert_eq!(order_row.status, OrderStatus::Processing);

    let proofs = payment_proof::find_by_order(&ctx.pool, order_id).await.unwrap();
    assert_eq!(proofs[0].status, ProofStatus::Verified);
    assert_eq!(proofs[0].admin_notes.as_deref(), Some("ok"));
}

/// Rejection fails the payment but leaves the order status alone.
#[tokio::test]
async fn test_reject_sets_failed_keeps_status() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;
    let proof = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();

    ctx.engine
        .verify_proof(order_id, proof.id, ProofDecision::Rejected, Some("blurry".into()))
        .await
        .unwrap();

    let order_row = order::find_by_id(&ctx.pool, order_id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_row.payment_status, PaymentStatus::Failed);
    assert_eq!(order_row.status, OrderStatus::Pending);
}

/// A customer can always re-upload after a rejection; the payment
/// status is forced back to uploaded, never to pending.
#[tokio::test]
async fn test_reupload_after_rejection() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;
    let first = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();
    ctx.engine
        .verify_proof(order_id, first.id, ProofDecision::Rejected, None)
        .await
        .unwrap();

    let second = ctx
        .engine
        .upload_proof(1, order_id, "proofs/b.jpg")
        .await
        .unwrap();
    assert_ne!(first.id, second.id);

    let order_row = order::find_by_id(&ctx.pool, order_id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_row.payment_status, PaymentStatus::Uploaded);

    // The rejected proof keeps its own state
    let proofs = payment_proof::find_by_order(&ctx.pool, order_id).await.unwrap();
    assert_eq!(proofs.len(), 2);
    let by_id = |id| proofs.iter().find(|p| p.id == id).unwrap();
    assert_eq!(by_id(first.id).status, ProofStatus::Rejected);
    assert_eq!(by_id(second.id).status, ProofStatus::Pending);
}

/// Sibling proofs hold independent states; the order's aggregate
/// payment status follows the most recently processed proof.
#[tokio::test]
async fn test_aggregate_status_is_last_write_wins() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;
    let first = ctx
        .engine
        .upload_proof(1, order_id, "proofs/a.jpg")
        .await
        .unwrap();
    let second = ctx
        .engine
        .upload_proof(1, order_id, "proofs/b.jpg")
        .await
        .unwrap();

    ctx.engine
        .verify_proof(order_id, first.id, ProofDecision::Verified, None)
        .await
        .unwrap();
    ctx.engine
        .verify_proof(order_id, second.id, ProofDecision::Rejected, None)
        .await
        .unwrap();

    let proofs = payment_proof::find_by_order(&ctx.pool, order_id).await.unwrap();
    let by_id = |id| proofs.iter().find(|p| p.id == id).unwrap();
    assert_eq!(by_id(first.id).status, ProofStatus::Verified);
    assert_eq!(by_id(second.id).status, ProofStatus::Rejected);

    // Last decision wins on the aggregate
    let order_row = order::find_by_id(&ctx.pool, order_id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order_row.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
async fn test_verify_unknown_proof_fails() {
    let ctx = setup().await;
    let order_id = place_pickup_order(&ctx, 1).await;

    let err = ctx
        .engine
        .verify_proof(order_id, 424242, ProofDecision::Verified, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentProofNotFound);
}
