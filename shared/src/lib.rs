//! Shared domain types for the GSM Store backend.
//!
//! Used by `store-server` and by API consumers that want typed payloads.
//! DB row types derive `sqlx::FromRow` behind the `db` feature so pure
//! clients don't pull in the database stack.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Common re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
