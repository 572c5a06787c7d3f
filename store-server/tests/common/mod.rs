//! Shared test harness: temp-file SQLite with migrations applied,
//! seeded users/products, and a checkout engine wired to a log sink.

// Each test binary uses a different subset of the harness
#![allow(dead_code)]

use shared::models::{Product, User, UserRole};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::sync::Arc;
use store_server::checkout::CheckoutEngine;
use store_server::db::DbService;
use store_server::services::notifier::{LogSink, NotifierService};
use store_server::services::shipping::ShippingRates;
use store_server::services::NoRates;
use tempfile::TempDir;

// Fields are held for their side effects (temp dir lifetime, worker
// task); not every test file reads them directly.
#[allow(dead_code)]
pub struct TestCtx {
    pub dir: TempDir,
    pub pool: SqlitePool,
    pub engine: CheckoutEngine,
    pub notifier_service: NotifierService,
}

/// Fresh database + engine with the default (quote-less) rate provider
pub async fn setup() -> TestCtx {
    setup_with_rates(Arc::new(NoRates)).await
}

/// Fresh database + engine with an injected rate provider
pub async fn setup_with_rates(rates: Arc<dyn ShippingRates>) -> TestCtx {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("store.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("database");

    let notifier_service = NotifierService::start(Arc::new(LogSink));
    let engine = CheckoutEngine::new(db.pool.clone(), notifier_service.notifier(), rates);

    TestCtx {
        dir,
        pool: db.pool,
        engine,
        notifier_service,
    }
}

/// Insert a customer; `complete_address` fills the fields courier
/// shipping requires
pub async fn seed_user(pool: &SqlitePool, id: i64, complete_address: bool) -> User {
    let now = now_millis();
    let (phone, detail, province, city) = if complete_address {
        (
            Some("081234567890"),
            Some("Jl. Dago 12"),
            Some("Jawa Barat"),
            Some("Bandung"),
        )
    } else {
        (None, None, None, None)
    };

    sqlx::query(
        "INSERT INTO users (id, name, email, phone, role, province, city, city_id, district, postal_code, address_detail, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, 'customer', ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )
    .bind(id)
    .bind(format!("Customer {id}"))
    .bind(format!("customer{id}@example.com"))
    .bind(phone)
    .bind(province)
    .bind(city)
    .bind(complete_address.then_some("23"))
    .bind(complete_address.then_some("Coblong"))
    .bind(complete_address.then_some("40132"))
    .bind(detail)
    .bind(now)
    .execute(pool)
    .await
    .expect("seed user");

    User {
        id,
        name: format!("Customer {id}"),
        email: format!("customer{id}@example.com"),
        phone: phone.map(String::from),
        role: UserRole::Customer,
        province: province.map(String::from),
        province_id: None,
        city: city.map(String::from),
        city_id: complete_address.then(|| "23".to_string()),
        district: complete_address.then(|| "Coblong".to_string()),
        district_id: None,
        subdistrict: None,
        subdistrict_id: None,
        postal_code: complete_address.then(|| "40132".to_string()),
        address_detail: detail.map(String::from),
        created_at: now,
        updated_at: now,
    }
}

/// Insert a product with optional tier prices
pub async fn seed_product(
    pool: &SqlitePool,
    id: i64,
    price: f64,
    price_3_items: Option<f64>,
    price_5_items: Option<f64>,
    stock: i64,
    weight: i64,
) -> Product {
    let now = now_millis();
    sqlx::query(
        "INSERT INTO products (id, name, price, price_3_items, price_5_items, stock, weight, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(format!("Product {id}"))
    .bind(price)
    .bind(price_3_items)
    .bind(price_5_items)
    .bind(stock)
    .bind(weight)
    .bind(now)
    .execute(pool)
    .await
    .expect("seed product");

    Product {
        id,
        name: format!("Product {id}"),
        price,
        price_3_items,
        price_5_items,
        stock,
        weight,
        last_price_update: None,
        created_at: now,
        updated_at: now,
    }
}

/// Put a product in a user's cart
pub async fn seed_cart_line(pool: &SqlitePool, user_id: i64, product_id: i64, quantity: i64) {
    let now = now_millis();
    sqlx::query(
        "INSERT INTO cart_items (id, user_id, product_id, quantity, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(now)
    .execute(pool)
    .await
    .expect("seed cart line");
}

/// Current stock of a product
pub async fn product_stock(pool: &SqlitePool, product_id: i64) -> i64 {
    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("stock query")
}

/// Number of cart lines a user has
pub async fn cart_count(pool: &SqlitePool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("cart count query")
}

/// Number of orders in the database
pub async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("order count query")
}
