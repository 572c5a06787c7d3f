//! Payment proof state machine
//!
//! Order status and payment status evolve independently. Upload and
//! verification are the only paths that move payment status; admin
//! manual edits bypass both (see the admin orders API).

use super::engine::CheckoutEngine;
use crate::db::repository::{order, payment_proof, user};
use shared::models::{PaymentProof, PaymentStatus, ProofDecision, ProofStatus};
use shared::{AppError, AppResult};

impl CheckoutEngine {
    /// Attach a new payment proof to an order (owner only).
    ///
    /// Rejected once payment is `verified`. On success the proof starts
    /// in `pending` and the order's payment status is force-set to
    /// `uploaded`, whatever it was before; a customer can always
    /// re-upload after a rejection.
    pub async fn upload_proof(
        &self,
        user_id: i64,
        order_id: i64,
        image_path: &str,
    ) -> AppResult<PaymentProof> {
        let order_row = order::find_by_id(self.pool(), order_id, Some(user_id))
            .await?
            .ok_or_else(|| AppError::order_not_found(order_id))?;

        if order_row.payment_status == PaymentStatus::Verified {
            return Err(AppError::payment_already_verified());
        }

        let proof = payment_proof::create(self.pool(), order_row.id, image_path).await?;
        order::set_payment_status(self.pool(), order_row.id, PaymentStatus::Uploaded).await?;

        tracing::info!(
            order_number = %order_row.order_number,
            proof_id = proof.id,
            "Payment proof uploaded"
        );
        Ok(proof)
    }

    /// Admin decision on one proof of one order.
    ///
    /// Only the targeted proof changes; siblings keep their own states.
    /// Side effect on the parent order: `verified` forces payment status
    /// to `verified` and order status to `processing`; `rejected` sets
    /// payment status to `failed` and leaves order status alone. The
    /// aggregate payment status is therefore last-write-wins across
    /// proofs.
    pub async fn verify_proof(
        &self,
        order_id: i64,
        proof_id: i64,
        decision: ProofDecision,
        admin_notes: Option<String>,
    ) -> AppResult<PaymentProof> {
        let order_row = order::find_by_id(self.pool(), order_id, None)
            .await?
            .ok_or_else(|| AppError::order_not_found(order_id))?;

        let proof = payment_proof::find_by_id(self.pool(), order_row.id, proof_id)
            .await?
            .ok_or_else(|| AppError::proof_not_found(proof_id))?;

        payment_proof::set_status(
            self.pool(),
            order_row.id,
            proof.id,
            ProofStatus::from(decision),
            admin_notes.clone(),
        )
        .await?;

        match decision {
            ProofDecision::Verified => {
                order::mark_payment_verified(self.pool(), order_row.id).await?;
            }
            ProofDecision::Rejected => {
                order::set_payment_status(self.pool(), order_row.id, PaymentStatus::Failed).await?;
            }
        }

        tracing::info!(
            order_number = %order_row.order_number,
            proof_id,
            ?decision,
            "Payment proof decided"
        );

        // Customer notice, best effort
        match user::find_by_id(self.pool(), order_row.user_id).await {
            Ok(Some(customer)) => {
                self.notifier()
                    .publish(crate::services::notifier::Notification::ProofDecided {
                        order_id: order_row.id,
                        order_number: order_row.order_number.clone(),
                        customer_email: customer.email,
                        decision,
                        admin_notes,
                    });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not load customer for proof notice"),
        }

        payment_proof::find_by_id(self.pool(), order_row.id, proof_id)
            .await?
            .ok_or_else(|| AppError::proof_not_found(proof_id))
    }
}
