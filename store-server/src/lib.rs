//! GSM Store backend
//!
//! E-commerce order engine: cart, checkout (transactional order
//! creation with a conditional stock guard), payment-proof
//! verification, admin order console and bulk price adjustment.
//! Catalog CRUD, auth session mechanics, the mailer and the
//! shipping-rate HTTP client are external collaborators.

pub mod api;
pub mod checkout;
pub mod core;
pub mod db;
pub mod pricing;
pub mod server;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use server::{CurrentUser, JwtService};
pub use shared::{AppError, AppResult};

/// Load `.env` and initialize logging based on the environment
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    let (level, json) = if config.is_production() {
        ("info", true)
    } else {
        ("debug", false)
    };

    std::fs::create_dir_all(&log_dir)?;
    let guard = utils::logger::init_logger(level, json, Some(&log_dir))?;
    // Keep the appender alive for the process lifetime
    if let Some(guard) = guard {
        Box::leak(Box::new(guard));
    }
    Ok(())
}
