//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`cart`] - cart management
//! - [`checkout`] - checkout preview and order creation
//! - [`orders`] - customer order history and payment proof upload
//! - [`admin_orders`] - staff order console: filters, status edits, proof verification
//! - [`admin_products`] - bulk price adjustment

pub mod admin_orders;
pub mod admin_products;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
