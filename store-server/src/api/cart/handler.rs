//! Cart API Handlers
//!
//! Cart mutations clamp quantities to the product's current stock; the
//! checkout transaction is the authoritative re-check.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{cart, product};
use crate::server::CurrentUser;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::CartSummary;

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: i64,
}

/// Add a product to the cart; an existing line increments, capped at
/// current stock
pub async fn add_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartCount>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product_row = product::find_by_id(&state.pool, payload.product_id)
        .await?
        .ok_or_else(|| AppError::product_not_found(payload.product_id))?;

    if product_row.stock < payload.quantity {
        return Err(AppError::insufficient_stock(product_row.id));
    }

    cart::add_item(
        &state.pool,
        current.id,
        product_row.id,
        payload.quantity,
        product_row.stock,
    )
    .await?;

    let count = cart::count(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Product added to cart",
        CartCount { count },
    )))
}

/// Cart contents with subtotal and total weight
pub async fn get_cart(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<CartSummary>>> {
    let lines = cart::find_lines(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::success(CartSummary::from_lines(lines))))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Set a cart line's quantity (must not exceed stock)
pub async fn update_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let line = cart::find_line(&state.pool, current.id, id)
        .await?
        .ok_or_else(|| AppError::with_message(shared::ErrorCode::CartItemNotFound, "Cart item not found"))?;

    if payload.quantity > line.product.stock {
        return Err(AppError::insufficient_stock(line.product.id));
    }

    cart::update_quantity(&state.pool, current.id, id, payload.quantity).await?;
    Ok(Json(ApiResponse::success_with_message("Quantity updated", ())))
}

pub async fn remove_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = cart::remove_item(&state.pool, current.id, id).await?;
    if !removed {
        return Err(AppError::with_message(
            shared::ErrorCode::CartItemNotFound,
            "Cart item not found",
        ));
    }
    Ok(Json(ApiResponse::success_with_message("Item removed", ())))
}

pub async fn clear(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    cart::clear(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::success_with_message("Cart cleared", ())))
}

pub async fn count(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<CartCount>>> {
    let count = cart::count(&state.pool, current.id).await?;
    Ok(Json(ApiResponse::success(CartCount { count })))
}
