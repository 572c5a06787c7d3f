//! Authentication
//!
//! Bearer-token identity only; the session/cookie machinery lives in the
//! external auth layer. Handlers take [`CurrentUser`] as an extractor.

mod extractor;
mod jwt;

pub use jwt::{Claims, JwtError, JwtService};

use shared::models::UserRole;
use shared::{AppError, AppResult};

/// Authenticated caller identity, extracted from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    /// Admin or subadmin, or fail with 403
    pub fn require_staff(&self) -> AppResult<()> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::forbidden("Staff role required"))
        }
    }

    /// Full admin only, or fail with 403
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(AppError::new(shared::ErrorCode::AdminRequired))
        }
    }
}
