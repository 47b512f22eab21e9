//! Unified error system for the kiosk
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::NotAuthenticated);
//! assert_eq!(err.code.code(), 1001);
//!
//! let err = AppError::validation("Missing product id").with_detail("field", "product_id");
//! assert!(err.details.is_some());
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;

/// Result alias used across crates
pub type AppResult<T> = Result<T, AppError>;
