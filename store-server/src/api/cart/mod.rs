//! Cart API module

mod handler;

use axum::routing::{delete, get, put};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart", get(handler::get_cart).post(handler::add_item))
        .route("/api/cart/count", get(handler::count))
        .route("/api/cart/clear", delete(handler::clear))
        .route(
            "/api/cart/{id}",
            put(handler::update_item).delete(handler::remove_item),
        )
}
