//! Data models
//!
//! Shared between store-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! millisecond epoch, all monetary amounts are `f64` (REAL).

pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod payment_proof;
pub mod product;
pub mod user;

// Re-exports
pub use cart_item::*;
pub use order::*;
pub use order_item::*;
pub use payment_proof::*;
pub use product::*;
pub use user::*;
