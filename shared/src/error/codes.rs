//! Unified error codes for the GSM Store backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Shipping errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Cart ====================
    /// Cart is empty
    CartEmpty = 3001,
    /// Cart item not found
    CartItemNotFound = 3002,
    /// Requested quantity exceeds available stock
    InsufficientStock = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Courier shipping selected but no courier given
    MissingCourier = 4002,
    /// Courier shipping selected but shipping address incomplete
    IncompleteAddress = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment has already been verified
    PaymentAlreadyVerified = 5001,
    /// Payment proof not found
    PaymentProofNotFound = 5002,
    /// Payment proof image missing from request
    PaymentImageRequired = 5003,
    /// Payment proof image has an unsupported format
    PaymentImageInvalid = 5004,
    /// Payment proof image exceeds the size limit
    PaymentImageTooLarge = 5005,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,

    // ==================== 7xxx: Shipping ====================
    /// No shipping quote available for the requested route
    ShippingQuoteUnavailable = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Too many requests (rate limited)
    TooManyRequests = 9004,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",

            Self::CartEmpty => "Cart is empty",
            Self::CartItemNotFound => "Cart item not found",
            Self::InsufficientStock => "Insufficient stock",

            Self::OrderNotFound => "Order not found",
            Self::MissingCourier => "Please select a courier",
            Self::IncompleteAddress => "Shipping address is incomplete",

            Self::PaymentAlreadyVerified => "Payment has already been verified",
            Self::PaymentProofNotFound => "Payment proof not found",
            Self::PaymentImageRequired => "Payment proof image is required",
            Self::PaymentImageInvalid => "Unsupported image format",
            Self::PaymentImageTooLarge => "Image exceeds the size limit",

            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Product has an invalid price",

            Self::ShippingQuoteUnavailable => "No shipping quote available",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::TooManyRequests => "Too many requests, please try again later",
        }
    }

    /// Numeric value of this code
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.as_u16())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,

            3001 => Self::CartEmpty,
            3002 => Self::CartItemNotFound,
            3003 => Self::InsufficientStock,

            4001 => Self::OrderNotFound,
            4002 => Self::MissingCourier,
            4003 => Self::IncompleteAddress,

            5001 => Self::PaymentAlreadyVerified,
            5002 => Self::PaymentProofNotFound,
            5003 => Self::PaymentImageRequired,
            5004 => Self::PaymentImageInvalid,
            5005 => Self::PaymentImageTooLarge,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInvalidPrice,

            7001 => Self::ShippingQuoteUnavailable,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::TooManyRequests,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::CartEmpty,
            ErrorCode::InsufficientStock,
            ErrorCode::MissingCourier,
            ErrorCode::PaymentAlreadyVerified,
            ErrorCode::TooManyRequests,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }
}
