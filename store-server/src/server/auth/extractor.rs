//! JWT Extractor
//!
//! Protected handlers take [`CurrentUser`] as an argument; extraction
//! validates the bearer token against the server's [`JwtService`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::core::ServerState;
use crate::server::auth::{CurrentUser, JwtError, JwtService};
use shared::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted earlier in the middleware chain
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "Missing authorization header");
                return Err(AppError::unauthorized());
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                tracing::debug!(user_id = user.id, role = ?user.role, "Authenticated");
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::token_expired()),
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
                Err(AppError::invalid_token("Invalid token"))
            }
        }
    }
}
