//! Admin Product API Handlers

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::pricing::{BulkAdjustOutcome, run_bulk_adjustment};
use crate::server::CurrentUser;
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct BulkPriceRequest {
    /// Percentage delta applied to base and tier prices
    #[validate(range(min = -100.0, max = 100.0))]
    pub percentage: f64,
}

/// Adjust every product's prices by a percentage (admin only)
pub async fn bulk_price(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<BulkPriceRequest>,
) -> AppResult<Json<ApiResponse<BulkAdjustOutcome>>> {
    current.require_admin()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = run_bulk_adjustment(&state.pool, payload.percentage).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Prices updated",
        outcome,
    )))
}
