//! Utility module: logging setup and upload processing

pub mod image;
pub mod logger;

// Re-export error types from shared for handler signatures
pub use shared::{ApiResponse, AppError, AppResult};
