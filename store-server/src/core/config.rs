//! Server configuration
//!
//! All settings load from environment variables with sensible defaults:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | ./work_dir | database, logs, uploads |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | JWT_SECRET | (dev default) | HS256 signing secret |
//! | RATE_LIMIT_PER_MINUTE | 100 | per-IP window on sensitive routes |
//! | BANK_NAME / BANK_ACCOUNT / BANK_NUMBER | (none) | transfer details in checkout responses |
//! | OPERATOR_EMAILS | (none) | comma-separated order-notification recipients |

use std::path::PathBuf;

/// Bank-transfer details shown with every checkout/order response
#[derive(Debug, Clone, serde::Serialize)]
pub struct BankDetails {
    pub name: String,
    pub account: String,
    pub number: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory: database, logs and uploads live underneath
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    /// Per-IP request budget per minute on sensitive endpoints
    pub rate_limit_per_minute: u32,
    /// Manual bank-transfer details
    pub bank: BankDetails,
    /// Order notification recipients (store operators)
    pub operator_emails: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "gsm-store-dev-secret".into()),
            rate_limit_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100),
            bank: BankDetails {
                name: std::env::var("BANK_NAME").unwrap_or_else(|_| "BCA".into()),
                account: std::env::var("BANK_ACCOUNT").unwrap_or_else(|_| "GSM Motor".into()),
                number: std::env::var("BANK_NUMBER").unwrap_or_else(|_| "0000000000".into()),
            },
            operator_emails: std::env::var("OPERATOR_EMAILS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Override work dir and port (tests)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Directory for the SQLite database file
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory for uploaded payment proofs
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// Directory for rotated log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        for dir in [self.database_dir(), self.upload_dir(), self.log_dir()] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
