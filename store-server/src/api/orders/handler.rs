//! Customer Order API Handlers

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::core::{BankDetails, ServerState};
use crate::db::repository::{order, payment_proof};
use crate::server::CurrentUser;
use crate::utils::image::store_proof_image;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::ErrorCode;
use shared::models::Order;
use shared::response::Paginated;

/// Query params for the order history listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

impl ListQuery {
    fn normalize(&self) -> (i64, i64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, 100);
        (page, per_page)
    }
}

/// Order history of the calling user, newest first
pub async fn list(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Order>>>> {
    let (page, per_page) = query.normalize();
    let offset = (page - 1) * per_page;

    let total = order::count_by_user(&state.pool, current.id).await?;
    let mut orders = order::find_by_user(&state.pool, current.id, per_page, offset).await?;
    for o in &mut orders {
        o.items = order::find_items(&state.pool, o.id).await?;
    }

    Ok(Json(ApiResponse::success(Paginated::new(
        orders, page, per_page, total,
    ))))
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub bank: BankDetails,
}

/// Order detail with lines and proofs. Owner-scoped unless the caller
/// is staff.
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let scope = if current.role.is_staff() {
        None
    } else {
        Some(current.id)
    };

    let mut order_row = order::find_by_id(&state.pool, id, scope)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    order_row.items = order::find_items(&state.pool, order_row.id).await?;
    order_row.payment_proofs = payment_proof::find_by_order(&state.pool, order_row.id).await?;

    Ok(Json(ApiResponse::success(OrderDetail {
        order: order_row,
        bank: state.config.bank.clone(),
    })))
}

/// Multipart payment proof upload (field name `image`)
pub async fn upload_payment(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut image_data: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("image") {
            // Cheap extension check before buffering; the image decoder
            // re-validates the actual bytes
            if let Some(filename) = field.file_name() {
                let mime = mime_guess::from_path(filename).first_or_octet_stream();
                if mime.type_() != mime_guess::mime::IMAGE {
                    return Err(AppError::new(ErrorCode::PaymentImageInvalid));
                }
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            image_data = Some(data.to_vec());
            break;
        }
    }

    let data = image_data.ok_or_else(|| AppError::new(ErrorCode::PaymentImageRequired))?;
    let image_path = store_proof_image(&state.config.upload_dir(), &data)?;

    state.checkout.upload_proof(current.id, id, &image_path).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Payment proof uploaded, awaiting admin verification",
        (),
    )))
}
