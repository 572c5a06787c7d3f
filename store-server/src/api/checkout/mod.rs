//! Checkout API module

mod handler;

use axum::routing::{get, post};
use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout", post(handler::checkout))
        .route("/api/checkout/prepare", get(handler::prepare))
}
