//! Admin Products API module

mod handler;

use axum::routing::post;
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/products/bulk-price",
        post(handler::bulk_price),
    )
}
