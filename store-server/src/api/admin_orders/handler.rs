//! Admin Order API Handlers
//!
//! Listing and detail are open to staff (admin + subadmin); manual
//! status edits and proof verification require the admin role.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{order, payment_proof, user};
use crate::server::CurrentUser;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::{Order, OrderStatus, PaymentStatus, ProofDecision, User};
use shared::response::Paginated;

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

/// All orders, filterable by status, payment status and search term
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Order>>>> {
    current.require_staff()?;

    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, 100);
    let offset = (page - 1) * per_page;

    let filter = order::OrderFilter {
        status: query.status,
        payment_status: query.payment_status,
        search: query.search.filter(|s| !s.is_empty()),
    };

    let total = order::count_all(&state.pool, &filter).await?;
    let mut orders = order::find_all(&state.pool, &filter, per_page, offset).await?;
    for o in &mut orders {
        o.items = order::find_items(&state.pool, o.id).await?;
    }

    Ok(Json(ApiResponse::success(Paginated::new(
        orders, page, per_page, total,
    ))))
}

#[derive(Debug, Serialize)]
pub struct AdminOrderDetail {
    pub order: Order,
    pub customer: Option<User>,
}

/// Full order detail including proofs and the customer record
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminOrderDetail>>> {
    current.require_staff()?;

    let mut order_row = order::find_by_id(&state.pool, id, None)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    order_row.items = order::find_items(&state.pool, order_row.id).await?;
    order_row.payment_proofs = payment_proof::find_by_order(&state.pool, order_row.id).await?;
    let customer = user::find_by_id(&state.pool, order_row.user_id).await?;

    Ok(Json(ApiResponse::success(AdminOrderDetail {
        order: order_row,
        customer,
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
}

/// Manual status edit: any provided field overwrites unconditionally
pub async fn update_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    current.require_admin()?;

    if payload.status.is_none()
        && payload.payment_status.is_none()
        && payload.tracking_number.is_none()
    {
        return Err(AppError::validation("No fields to update"));
    }

    let affected = order::update_status(
        &state.pool,
        id,
        payload.status,
        payload.payment_status,
        payload.tracking_number.filter(|t| !t.is_empty()),
    )
    .await?;
    if affected == 0 {
        return Err(AppError::order_not_found(id));
    }

    let order_row = order::find_by_id(&state.pool, id, None)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;

    Ok(Json(ApiResponse::success_with_message(
        "Order status updated",
        order_row,
    )))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub status: ProofDecision,
    pub admin_notes: Option<String>,
}

/// Decide on one payment proof of one order
pub async fn verify_payment(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((id, proof_id)): Path<(i64, i64)>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    current.require_admin()?;

    state
        .checkout
        .verify_proof(
            id,
            proof_id,
            payload.status,
            payload.admin_notes.filter(|n| !n.is_empty()),
        )
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        "Payment verification recorded",
        (),
    )))
}
