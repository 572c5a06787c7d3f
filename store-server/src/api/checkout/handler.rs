//! Checkout API Handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::checkout::{CheckoutPreview, PlaceOrder};
use crate::core::{BankDetails, ServerState};
use crate::db::repository::user;
use crate::server::CurrentUser;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::{ShippingMethod, User};

/// Customer snapshot echoed back to the checkout page
#[derive(Debug, Serialize)]
pub struct AddressInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub city_id: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub postal_code: Option<String>,
    pub address_detail: Option<String>,
}

impl From<&User> for AddressInfo {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            province: u.province.clone(),
            city: u.city.clone(),
            city_id: u.city_id.clone(),
            district: u.district.clone(),
            subdistrict: u.subdistrict.clone(),
            postal_code: u.postal_code.clone(),
            address_detail: u.address_detail.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PrepareResponse {
    #[serde(flatten)]
    pub preview: CheckoutPreview,
    pub user: AddressInfo,
    pub bank: BankDetails,
}

/// Checkout preview: cart totals, address completeness, bank details
pub async fn prepare(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<PrepareResponse>>> {
    let db_user = user::get(&state.pool, current.id).await?;
    let preview = state.checkout.prepare(&db_user).await?;
    Ok(Json(ApiResponse::success(PrepareResponse {
        preview,
        user: AddressInfo::from(&db_user),
        bank: state.config.bank.clone(),
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub shipping_method: ShippingMethod,
    #[validate(length(max = 64))]
    pub courier: Option<String>,
    #[validate(length(max = 64))]
    pub courier_service: Option<String>,
    pub shipping_cost: Option<f64>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_number: String,
    pub order_id: i64,
    pub total: f64,
    pub shipping_address: String,
    pub bank: BankDetails,
}

/// Create an order from the caller's cart
pub async fn checkout(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let db_user = user::get(&state.pool, current.id).await?;
    let request = PlaceOrder {
        shipping_method: payload.shipping_method,
        courier: payload.courier,
        courier_service: payload.courier_service,
        shipping_cost: payload.shipping_cost,
        notes: payload.notes,
    };

    let receipt = state.checkout.place_order(&db_user, &request).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Order created successfully",
        CheckoutResponse {
            order_number: receipt.order_number,
            order_id: receipt.order_id,
            total: receipt.total,
            shipping_address: receipt.shipping_address,
            bank: state.config.bank.clone(),
        },
    )))
}
