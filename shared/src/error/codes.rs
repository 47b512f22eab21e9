//! Unified error codes for the kiosk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Cart errors
//! - 6xxx: Product / catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (wrong one-time password)
    InvalidCredentials = 1002,

    // ==================== 4xxx: Cart ====================
    /// Quantity or delta outside the accepted range
    InvalidQuantity = 4001,
    /// Malformed variant / add-on selection
    InvalidSelection = 4002,
    /// Bare product id matches several cart lines
    AmbiguousSelection = 4003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Variant does not belong to the product
    VariantNotFound = 6201,
    /// Add-on does not belong to the product
    AddonNotFound = 6301,
    /// Catalog data could not be loaded
    CatalogInvalid = 6901,

    // ==================== 9xxx: System ====================
    /// Local storage read/write failed
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid one-time password",

            // Cart
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InvalidSelection => "Invalid selection",
            ErrorCode::AmbiguousSelection => "Selection matches more than one cart line",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::AddonNotFound => "Add-on not found",
            ErrorCode::CatalogInvalid => "Catalog data is invalid",

            // System
            ErrorCode::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Cart
            4001 => Ok(ErrorCode::InvalidQuantity),
            4002 => Ok(ErrorCode::InvalidSelection),
            4003 => Ok(ErrorCode::AmbiguousSelection),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6201 => Ok(ErrorCode::VariantNotFound),
            6301 => Ok(ErrorCode::AddonNotFound),
            6901 => Ok(ErrorCode::CatalogInvalid),

            // System
            9401 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
