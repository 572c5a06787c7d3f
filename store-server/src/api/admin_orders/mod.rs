//! Admin Orders API module

mod handler;

use axum::routing::{get, post};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::list))
        .route(
            "/api/admin/orders/{id}",
            get(handler::get_by_id).patch(handler::update_status),
        )
        .route(
            "/api/admin/orders/{id}/verify-payment/{proof_id}",
            post(handler::verify_payment),
        )
}
