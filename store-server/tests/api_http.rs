//! HTTP-surface tests: routing, auth extraction, response envelope and
//! role checks, driven through the composed router.

mod common;

use axum::Router;
use axum::body::Body;
use common::*;
use http::{Request, StatusCode, header};
use shared::models::UserRole;
use std::sync::Arc;
use store_server::core::{Config, ServerState};
use store_server::services::NoRates;
use store_server::{JwtService, Server};
use tower::ServiceExt;

async fn test_app() -> (Router, ServerState, TestCtx) {
    let ctx = setup().await;
    let config = Config::with_overrides(ctx.dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::new(
        config,
        ctx.pool.clone(),
        ctx.notifier_service.notifier(),
        Arc::new(NoRates),
    );
    (Server::build_router(state.clone()), state, ctx)
}

fn bearer(jwt: &JwtService, user_id: i64, role: UserRole) -> String {
    let token = jwt
        .generate_token(user_id, "Test User", "test@example.com", role)
        .expect("token");
    format!("Bearer {token}")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state, _ctx) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "up");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let (app, _state, _ctx) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/cart")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 1001);
}

#[tokio::test]
async fn test_cart_and_checkout_over_http() {
    let (app, state, ctx) = test_app().await;
    seed_user(&ctx.pool, 1, true).await;
    seed_product(&ctx.pool, 10, 10_000.0, Some(9_000.0), None, 10, 500).await;
    let auth = bearer(&state.jwt_service, 1, UserRole::Customer);

    // Add 3 units to the cart
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cart")
                .header(header::AUTHORIZATION, &auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"product_id": 10, "quantity": 3}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);

    // Preview
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/checkout/prepare")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["subtotal"], 27_000.0);
    assert_eq!(json["data"]["has_address"], true);

    // Checkout as pickup
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/checkout")
                .header(header::AUTHORIZATION, &auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"shipping_method": "pickup"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 27_000.0);
    let order_number = json["data"]["order_number"].as_str().unwrap();
    assert!(order_number.starts_with("GSM-"));
    let order_id = json["data"]["order_id"].as_i64().unwrap();

    // Order shows up in the history
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["data"]["meta"]["total"], 1);
    assert_eq!(json["data"]["data"][0]["id"], order_id);
}

#[tokio::test]
async fn test_checkout_empty_cart_maps_to_400() {
    let (app, state, ctx) = test_app().await;
    seed_user(&ctx.pool, 1, true).await;
    let auth = bearer(&state.jwt_service, 1, UserRole::Customer);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/checkout")
                .header(header::AUTHORIZATION, &auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"shipping_method": "pickup"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 3001);
}

#[tokio::test]
async fn test_admin_routes_enforce_roles() {
    let (app, state, ctx) = test_app().await;
    seed_user(&ctx.pool, 1, true).await;
    let customer = bearer(&state.jwt_service, 1, UserRole::Customer);
    let subadmin = bearer(&state.jwt_service, 2, UserRole::Subadmin);
    let admin = bearer(&state.jwt_service, 3, UserRole::Admin);

    // Customers cannot list all orders
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/orders")
                .header(header::AUTHORIZATION, &customer)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Subadmins can read the console
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/orders")
                .header(header::AUTHORIZATION, &subadmin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // But only admins run the bulk price adjustment
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/products/bulk-price")
                .header(header::AUTHORIZATION, &subadmin)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"percentage": 5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/products/bulk-price")
                .header(header::AUTHORIZATION, &admin)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"percentage": 5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
