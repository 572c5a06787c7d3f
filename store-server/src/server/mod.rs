//! Server plumbing: authentication and HTTP middleware

pub mod auth;
pub mod middleware;

pub use auth::{CurrentUser, JwtService};
